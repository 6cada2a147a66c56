#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;
use lab_core::model::{SessionState, TaskId};
use services::{GuideIntent, GuideSessionService};

use crate::context::AppContext;
use crate::views::chrome::{GuideHeader, Sidebar};
use crate::views::section::SectionPage;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::GuideVm;

/// Loads the stored session and renders the guide once it is ready.
///
/// Every state change is forwarded to a background task that saves it, so
/// rendering never waits on storage. Saves still queued when the window closes
/// are lost; the last completed save is what the next launch resumes from.
#[component]
pub fn GuideView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_signal(|| None::<GuideSessionService>);

    let persister = ctx.services().persister();
    let saver = use_coroutine(move |mut rx: UnboundedReceiver<SessionState>| {
        let persister = persister.clone();
        async move {
            while let Some(state) = rx.next().await {
                persister.save(&state).await;
            }
        }
    });

    let services = ctx.services();
    let resource = use_resource(move || {
        let services = services.clone();
        async move {
            let mut hydrated = services.start_session().await;
            hydrated.subscribe(move |state| saver.send(state.clone()));
            session.set(Some(hydrated));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "guide",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "guide__loading", "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "guide__error", "{err.message()}" }
                },
                ViewState::Ready(()) => rsx! {
                    GuidePage { session }
                },
            }
        }
    }
}

/// The guide screen for an already hydrated session.
#[component]
pub fn GuidePage(session: Signal<Option<GuideSessionService>>) -> Element {
    let mut session = session;
    let mut sidebar_open = use_signal(|| true);

    let dispatch = use_callback(move |intent: GuideIntent| {
        let mut guard = session.write();
        let Some(svc) = guard.as_mut() else {
            return;
        };
        if let Err(err) = svc.dispatch(&intent) {
            tracing::warn!(error = %err, ?intent, "intent rejected");
        }
    });
    let on_select = use_callback(move |index: usize| {
        dispatch.call(GuideIntent::GoTo(index));
        sidebar_open.set(false);
    });
    let on_toggle = use_callback(move |task: TaskId| dispatch.call(GuideIntent::Toggle(task)));
    let on_previous = use_callback(move |()| dispatch.call(GuideIntent::Previous));
    let on_next = use_callback(move |()| dispatch.call(GuideIntent::Next));
    let on_toggle_sidebar = use_callback(move |()| {
        let open = sidebar_open();
        sidebar_open.set(!open);
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<GuideTestHandles>() {
                handles.register(dispatch, session);
            }
        }
    }

    let Some(vm) = session.read().as_ref().map(GuideVm::from_session) else {
        return rsx! {
            p { class: "guide__loading", "Loading..." }
        };
    };

    rsx! {
        GuideHeader {
            header: vm.header,
            sidebar_open: sidebar_open(),
            on_toggle_sidebar,
        }
        div { class: "guide__body",
            Sidebar { items: vm.sidebar, open: sidebar_open(), on_select }
            main { class: "guide__main",
                SectionPage {
                    page: vm.page,
                    nav: vm.nav,
                    on_toggle,
                    on_previous,
                    on_next,
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct GuideTestHandles {
    dispatch: Rc<RefCell<Option<Callback<GuideIntent>>>>,
    session: Rc<RefCell<Option<Signal<Option<GuideSessionService>>>>>,
}

#[cfg(test)]
impl GuideTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<GuideIntent>,
        session: Signal<Option<GuideSessionService>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<GuideIntent> {
        (*self.dispatch.borrow()).expect("guide dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<Option<GuideSessionService>> {
        (*self.session.borrow()).expect("guide session registered")
    }
}
