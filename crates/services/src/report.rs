use std::fmt;

use lab_core::SessionController;
use lab_core::model::{SectionId, SectionProgress, percent};

/// One row of the table of contents.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionReport {
    pub index: usize,
    pub id: SectionId,
    pub title: String,
    pub duration: String,
    pub progress: SectionProgress,
    pub is_current: bool,
}

impl SectionReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }
}

/// Snapshot of where a learner stands in the guide.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub guide_title: String,
    pub current_section: usize,
    pub section_count: usize,
    pub overall_fraction: f64,
    pub tasks: SectionProgress,
    pub sections: Vec<SectionReport>,
}

impl ProgressReport {
    #[must_use]
    pub fn from_controller(controller: &SessionController) -> Self {
        let guide = controller.guide();
        let current = controller.current_section();
        let sections = guide
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| SectionReport {
                index,
                id: section.id().clone(),
                title: section.title().to_owned(),
                duration: section.duration().to_owned(),
                progress: controller.section_progress(index).unwrap_or_default(),
                is_current: index == current,
            })
            .collect();

        Self {
            guide_title: guide.title().to_owned(),
            current_section: current,
            section_count: guide.len(),
            overall_fraction: controller.overall_progress_fraction(),
            tasks: controller.overall_task_progress(),
            sections,
        }
    }

    /// Whole-number percentage of the way through the guide.
    #[must_use]
    pub fn overall_percent(&self) -> u8 {
        percent(self.overall_fraction)
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: section {} of {} ({}%)",
            self.guide_title,
            self.current_section + 1,
            self.section_count,
            self.overall_percent()
        )?;
        writeln!(
            f,
            "tasks completed: {}/{}",
            self.tasks.completed, self.tasks.total
        )?;
        for section in &self.sections {
            let marker = if section.is_current { '>' } else { ' ' };
            let check = if section.is_complete() { " [done]" } else { "" };
            write!(
                f,
                "{marker} {:>2}. {} ({})",
                section.index + 1,
                section.title,
                section.duration
            )?;
            if section.progress.has_tasks() {
                write!(
                    f,
                    " {}/{} tasks",
                    section.progress.completed, section.progress.total
                )?;
            }
            writeln!(f, "{check}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use lab_core::model::{Guide, TaskId};

    fn controller() -> SessionController {
        let raw = r#"{"title": "Lab", "sections": [
            {"id": "intro", "title": "Intro", "duration": "3 min"},
            {"id": "setup", "title": "Setup", "duration": "5 min",
             "tasks": [{"id": "t1", "label": "Clone"}, {"id": "t2", "label": "Install"}]},
            {"id": "build", "title": "Build", "duration": "10 min",
             "tasks": [{"id": "t3", "label": "Run"}]}
        ]}"#;
        SessionController::new(Arc::new(Guide::from_json_str(raw).unwrap()))
    }

    #[test]
    fn report_reflects_controller_state() {
        let mut ctl = controller();
        ctl.toggle_task(&TaskId::new("t1")).unwrap();
        ctl.toggle_task(&TaskId::new("t2")).unwrap();
        ctl.go_to_section(1);

        let report = ProgressReport::from_controller(&ctl);
        assert_eq!(report.section_count, 3);
        assert_eq!(report.overall_percent(), 50);
        assert_eq!(report.tasks, SectionProgress { completed: 2, total: 3 });
        assert!(report.sections[1].is_current);
        assert!(report.sections[1].is_complete());
        assert!(!report.sections[0].is_complete());
    }

    #[test]
    fn display_lists_every_section() {
        let report = ProgressReport::from_controller(&controller());
        let text = report.to_string();
        assert!(text.starts_with("Lab: section 1 of 3 (0%)"), "{text}");
        assert!(text.contains(">  1. Intro (3 min)"), "{text}");
        assert!(text.contains("   2. Setup (5 min) 0/2 tasks"), "{text}");
    }
}
