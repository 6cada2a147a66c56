use dioxus::prelude::*;

use crate::vm::{HeaderVm, SidebarItemVm};

#[component]
pub fn GuideHeader(
    header: HeaderVm,
    sidebar_open: bool,
    on_toggle_sidebar: EventHandler<()>,
) -> Element {
    let progress_style = format!("width: {}%", header.progress_percent);
    let (menu_label, menu_icon) = if sidebar_open {
        ("Close sections", "✕")
    } else {
        ("Open sections", "☰")
    };
    rsx! {
        header { class: "guide-header",
            div { class: "guide-header__brand",
                button {
                    class: "guide-header__menu",
                    r#type: "button",
                    aria_label: "{menu_label}",
                    onclick: move |_| on_toggle_sidebar.call(()),
                    "{menu_icon}"
                }
                div {
                    h1 { class: "guide-header__title", "{header.title}" }
                    if let Some(subtitle) = header.subtitle.as_ref() {
                        p { class: "guide-header__subtitle", "{subtitle}" }
                    }
                }
            }
            div { class: "guide-header__position",
                div { class: "guide-header__label", "{header.position_label}" }
                div { class: "bar",
                    div { class: "bar__fill", style: "{progress_style}" }
                }
            }
        }
    }
}

#[component]
pub fn Sidebar(items: Vec<SidebarItemVm>, open: bool, on_select: EventHandler<usize>) -> Element {
    let class = if open { "sidebar sidebar--open" } else { "sidebar" };
    rsx! {
        aside { class: "{class}",
            h2 { class: "sidebar__heading", "Lab Sections" }
            nav { class: "sidebar__nav",
                for item in items {
                    SidebarEntry { key: "{item.index}", item, on_select }
                }
            }
        }
    }
}

#[component]
fn SidebarEntry(item: SidebarItemVm, on_select: EventHandler<usize>) -> Element {
    let class = if item.is_current {
        "sidebar__entry sidebar__entry--current"
    } else {
        "sidebar__entry"
    };
    let index = item.index;
    let bar_style = format!("width: {}%", item.tasks_percent);
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| on_select.call(index),
            div { class: "sidebar__row",
                div { class: "sidebar__text",
                    div { class: "sidebar__title", "{item.title}" }
                    div { class: "sidebar__duration", "{item.duration}" }
                }
                if item.is_complete {
                    span { class: "sidebar__check", aria_label: "Section complete", "✓" }
                }
            }
            if let Some(label) = item.tasks_label.as_ref() {
                div { class: "sidebar__tasks",
                    span { "{label}" }
                    div { class: "bar bar--thin",
                        div { class: "bar__fill bar__fill--done", style: "{bar_style}" }
                    }
                }
            }
        }
    }
}
