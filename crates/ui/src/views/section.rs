use dioxus::prelude::*;
use lab_core::model::TaskId;

use crate::views::blocks::{CheckboxTask, ContentBlockView};
use crate::vm::{NavVm, SectionPageVm};

#[component]
pub fn SectionPage(
    page: SectionPageVm,
    nav: NavVm,
    on_toggle: EventHandler<TaskId>,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    rsx! {
        article { class: "section", id: "section-{page.index}",
            div { class: "section__meta",
                span { class: "section__number", "{page.number_label}" }
                span { "•" }
                span { "{page.duration}" }
            }
            h2 { class: "section__title", "{page.title}" }
            if let Some(subtitle) = page.subtitle.as_ref() {
                p { class: "section__subtitle", "{subtitle}" }
            }

            if !page.tasks.is_empty() {
                div { class: "tasks",
                    h3 { class: "tasks__heading", "Your Tasks" }
                    div { class: "tasks__list",
                        for task in page.tasks.iter().cloned() {
                            CheckboxTask { key: "{task.id}", task, on_toggle }
                        }
                    }
                }
            }

            div { class: "section__content",
                for (idx, block) in page.blocks.iter().cloned().enumerate() {
                    div { key: "{idx}", class: "section__block",
                        ContentBlockView { block }
                    }
                }
            }

            div { class: "section__nav",
                button {
                    class: "btn btn-secondary",
                    id: "section-previous",
                    r#type: "button",
                    disabled: !nav.can_previous,
                    onclick: move |_| on_previous.call(()),
                    "Previous"
                }
                button {
                    class: "btn btn-primary",
                    id: "section-next",
                    r#type: "button",
                    disabled: !nav.can_next,
                    onclick: move |_| on_next.call(()),
                    "Next"
                }
            }
        }
    }
}
