use std::time::Duration;

use dioxus::prelude::*;
use lab_core::model::{CalloutVariant, TaskId};

use crate::views::scripts::write_clipboard;
use crate::vm::{BlockVm, CodeVm, StepVm, TaskItemVm};

const COPIED_RESET: Duration = Duration::from_secs(2);

#[component]
pub fn CheckboxTask(task: TaskItemVm, on_toggle: EventHandler<TaskId>) -> Element {
    let label_class = if task.checked {
        "task__label task__label--done"
    } else {
        "task__label"
    };
    let id = task.id.clone();
    rsx! {
        label { class: "task",
            input {
                class: "task__checkbox",
                r#type: "checkbox",
                checked: task.checked,
                onchange: move |_| on_toggle.call(id.clone()),
            }
            span { class: "{label_class}", "{task.label}" }
        }
    }
}

#[component]
pub fn CodeBlock(code: CodeVm) -> Element {
    let mut copied = use_signal(|| false);
    let text = code.code.clone();
    let on_copy = move |_| {
        let text = text.clone();
        spawn(async move {
            write_clipboard(&text).await;
            copied.set(true);
            tokio::time::sleep(COPIED_RESET).await;
            copied.set(false);
        });
    };
    let pre_class = if code.title.is_some() {
        "code__pre code__pre--titled"
    } else {
        "code__pre"
    };

    rsx! {
        div { class: "code",
            if let Some(title) = code.title.as_ref() {
                div { class: "code__title", "{title}" }
            }
            div { class: "code__body",
                pre { class: "{pre_class}",
                    code { class: "language-{code.language}", "{code.code}" }
                }
                button {
                    class: "code__copy",
                    r#type: "button",
                    title: "Copy to clipboard",
                    onclick: on_copy,
                    if copied() { "Copied" } else { "Copy" }
                }
            }
        }
    }
}

#[component]
fn StepItem(step: StepVm) -> Element {
    rsx! {
        div { class: "step",
            div { class: "step__number", "{step.number}" }
            div { class: "step__body",
                h4 { class: "step__title", "{step.title}" }
                if let Some(description) = step.description.as_ref() {
                    p { class: "step__description", "{description}" }
                }
                if let Some(code) = step.code.clone() {
                    CodeBlock { code }
                }
            }
        }
    }
}

fn callout_class(variant: CalloutVariant) -> String {
    format!("callout callout--{}", variant.as_str())
}

#[component]
pub fn ContentBlockView(block: BlockVm) -> Element {
    match block {
        BlockVm::Text { html } => rsx! {
            div { class: "markdown", dangerous_inner_html: "{html}" }
        },
        BlockVm::List { items_html } => rsx! {
            ul { class: "bullets",
                for (idx, item) in items_html.into_iter().enumerate() {
                    li { key: "{idx}", dangerous_inner_html: "{item}" }
                }
            }
        },
        BlockVm::Code(code) => rsx! {
            CodeBlock { code }
        },
        BlockVm::Callout {
            title,
            value,
            variant,
        } => {
            let class = callout_class(variant);
            rsx! {
                div { class: "{class}",
                    if let Some(title) = title {
                        p { class: "callout__title", "{title}" }
                    }
                    p { class: "callout__body", "{value}" }
                }
            }
        }
        BlockVm::Steps(steps) => rsx! {
            div { class: "steps",
                for step in steps {
                    StepItem { key: "{step.number}", step }
                }
            }
        },
    }
}
