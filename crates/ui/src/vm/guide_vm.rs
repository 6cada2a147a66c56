use lab_core::model::{CalloutVariant, ContentBlock, Section, TaskId, percent};
use services::{GuideSessionService, ProgressReport};

use crate::vm::html::sanitize_html;

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderVm {
    pub title: String,
    pub subtitle: Option<String>,
    pub position_label: String,
    pub progress_percent: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SidebarItemVm {
    pub index: usize,
    pub title: String,
    pub duration: String,
    pub is_current: bool,
    pub is_complete: bool,
    /// `"c/t tasks"`, only for sections that have tasks.
    pub tasks_label: Option<String>,
    pub tasks_percent: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskItemVm {
    pub id: TaskId,
    pub label: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepVm {
    pub number: usize,
    pub title: String,
    pub description: Option<String>,
    pub code: Option<CodeVm>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CodeVm {
    pub code: String,
    pub language: String,
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BlockVm {
    Text { html: String },
    List { items_html: Vec<String> },
    Code(CodeVm),
    Callout {
        title: Option<String>,
        value: String,
        variant: CalloutVariant,
    },
    Steps(Vec<StepVm>),
}

impl BlockVm {
    #[must_use]
    pub fn from_block(block: &ContentBlock) -> Self {
        match block {
            ContentBlock::Text { value } => Self::Text {
                html: sanitize_html(value),
            },
            ContentBlock::List { items } => Self::List {
                items_html: items.iter().map(|item| sanitize_html(item)).collect(),
            },
            ContentBlock::Code {
                value,
                title,
                language: _,
            } => Self::Code(CodeVm {
                code: value.clone(),
                language: block.code_language().unwrap_or_default().to_owned(),
                title: title.clone(),
            }),
            ContentBlock::Callout {
                value,
                title,
                variant,
            } => Self::Callout {
                title: title.clone(),
                value: value.clone(),
                variant: *variant,
            },
            ContentBlock::Steps { steps } => Self::Steps(
                steps
                    .iter()
                    .enumerate()
                    .map(|(idx, step)| StepVm {
                        number: idx + 1,
                        title: step.title.clone(),
                        description: step.description.clone(),
                        code: step.code.as_ref().map(|code| CodeVm {
                            code: code.clone(),
                            language: step.language_or_default().to_owned(),
                            title: None,
                        }),
                    })
                    .collect(),
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionPageVm {
    pub index: usize,
    pub number_label: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub duration: String,
    pub tasks: Vec<TaskItemVm>,
    pub blocks: Vec<BlockVm>,
}

impl SectionPageVm {
    #[must_use]
    pub fn new(index: usize, section: &Section, is_checked: impl Fn(&TaskId) -> bool) -> Self {
        Self {
            index,
            number_label: format!("Section {}", index + 1),
            title: section.title().to_owned(),
            subtitle: section.subtitle().map(str::to_owned),
            duration: section.duration().to_owned(),
            tasks: section
                .tasks()
                .iter()
                .map(|task| TaskItemVm {
                    id: task.id.clone(),
                    label: task.label.clone(),
                    checked: is_checked(&task.id),
                })
                .collect(),
            blocks: section.content().iter().map(BlockVm::from_block).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavVm {
    pub can_previous: bool,
    pub can_next: bool,
}

/// Everything the guide screen renders, derived from one session snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideVm {
    pub header: HeaderVm,
    pub sidebar: Vec<SidebarItemVm>,
    pub page: SectionPageVm,
    pub nav: NavVm,
}

impl GuideVm {
    #[must_use]
    pub fn from_session(session: &GuideSessionService) -> Self {
        let controller = session.controller();
        let guide = controller.guide();
        let report = session.report();
        let current = controller.current_section();
        let section = &guide.sections()[current];

        Self {
            header: HeaderVm {
                title: guide.title().to_owned(),
                subtitle: guide.subtitle().map(str::to_owned),
                position_label: format!("Section {} of {}", current + 1, report.section_count),
                progress_percent: report.overall_percent(),
            },
            sidebar: map_sidebar(&report),
            page: SectionPageVm::new(current, section, |task| controller.is_task_completed(task)),
            nav: NavVm {
                can_previous: controller.can_go_previous(),
                can_next: controller.can_go_next(),
            },
        }
    }
}

#[must_use]
pub fn map_sidebar(report: &ProgressReport) -> Vec<SidebarItemVm> {
    report
        .sections
        .iter()
        .map(|section| SidebarItemVm {
            index: section.index,
            title: section.title.clone(),
            duration: section.duration.clone(),
            is_current: section.is_current,
            is_complete: section.is_complete(),
            tasks_label: section.progress.has_tasks().then(|| {
                format!(
                    "{}/{} tasks",
                    section.progress.completed, section.progress.total
                )
            }),
            tasks_percent: percent(section.progress.fraction()),
        })
        .collect()
}
