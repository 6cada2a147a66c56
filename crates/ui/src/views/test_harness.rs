use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use lab_core::model::Guide;
use lab_core::time::fixed_clock;
use services::{AppServices, GuideIntent, GuideSessionService};
use storage::repository::{InMemoryRepository, ProgressRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::guide::GuideTestHandles;
use crate::views::{GuidePage, GuideView};

pub const GUIDE_JSON: &str = r#"{
    "title": "Cursor Workshop",
    "subtitle": "Hands-On Lab Guide",
    "sections": [
        {"id": "welcome", "title": "Welcome", "duration": "3 min",
         "content": [{"type": "text", "value": "<p>Welcome to the lab.</p>"}]},
        {"id": "basics", "title": "Basics", "duration": "10 min",
         "tasks": [
            {"id": "open-chat", "label": "Open the chat panel"},
            {"id": "ask", "label": "Ask a question"}
         ],
         "content": [
            {"type": "callout", "variant": "warning", "title": "Heads up", "value": "Save first"},
            {"type": "code", "title": "Terminal", "value": "cargo run", "language": "sh"}
         ]},
        {"id": "wrap-up", "title": "Wrap Up", "duration": "2 min",
         "content": [{"type": "list", "items": ["Review", "Share"]}]}
    ]
}"#;

pub fn guide() -> Arc<Guide> {
    Arc::new(Guide::from_json_str(GUIDE_JSON).expect("valid guide"))
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }
}

#[derive(Clone)]
enum HarnessMode {
    View,
    Page {
        seed: Rc<RefCell<Option<GuideSessionService>>>,
    },
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    mode: HarnessMode,
    handles: GuideTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn HarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    match props.mode {
        HarnessMode::View => rsx! { GuideView {} },
        HarnessMode::Page { seed } => rsx! { PageRoot { seed } },
    }
}

#[derive(Props, Clone)]
struct PageRootProps {
    seed: Rc<RefCell<Option<GuideSessionService>>>,
}

impl PartialEq for PageRootProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn PageRoot(props: PageRootProps) -> Element {
    let session = use_signal(|| props.seed.borrow_mut().take());
    rsx! { GuidePage { session } }
}

pub struct GuideHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    handles: GuideTestHandles,
}

impl GuideHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    /// Send `intent` through the page's dispatch callback, as a click would.
    pub fn dispatch(&mut self, intent: GuideIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Run `f` against the live session held by the page.
    pub fn with_session<R>(&mut self, f: impl FnOnce(&mut GuideSessionService) -> R) -> R {
        let mut session = self.handles.session();
        let out = self.dom.in_runtime(|| {
            let mut guard = session.write();
            f(guard.as_mut().expect("session hydrated"))
        });
        drive_dom(&mut self.dom);
        out
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn app_for(repo: &InMemoryRepository) -> Arc<TestApp> {
    let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
    let storage = Storage { progress };
    Arc::new(TestApp {
        services: AppServices::new(guide(), &storage, fixed_clock()),
    })
}

/// Full `GuideView`, hydrating from `repo` once driven.
pub fn setup_view_harness(repo: InMemoryRepository) -> GuideHarness {
    let app = app_for(&repo);
    let handles = GuideTestHandles::default();
    let dom = VirtualDom::new_with_props(
        HarnessRoot,
        HarnessProps {
            app,
            mode: HarnessMode::View,
            handles: handles.clone(),
        },
    );
    GuideHarness { dom, repo, handles }
}

/// `GuidePage` over a session hydrated before the DOM is built, with no saver attached.
pub async fn setup_page_harness(repo: InMemoryRepository) -> GuideHarness {
    let app = app_for(&repo);
    let session = app.services.start_session().await;
    let handles = GuideTestHandles::default();
    let dom = VirtualDom::new_with_props(
        HarnessRoot,
        HarnessProps {
            app,
            mode: HarnessMode::Page {
                seed: Rc::new(RefCell::new(Some(session))),
            },
            handles: handles.clone(),
        },
    );
    GuideHarness { dom, repo, handles }
}
