use std::collections::BTreeMap;

use crate::model::guide::Guide;
use crate::model::ids::TaskId;
use crate::model::section::Section;

/// Mutable, persisted progress through a guide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_section: usize,
    pub completed_tasks: BTreeMap<TaskId, bool>,
}

impl SessionState {
    #[must_use]
    pub fn new(current_section: usize, completed_tasks: BTreeMap<TaskId, bool>) -> Self {
        Self {
            current_section,
            completed_tasks,
        }
    }

    /// Absent tasks count as not completed.
    #[must_use]
    pub fn is_task_completed(&self, task: &TaskId) -> bool {
        self.completed_tasks.get(task).copied().unwrap_or(false)
    }

    /// Clamp a hydrated state into the bounds of `guide`.
    ///
    /// The completion map is kept as-is, including ids the guide does not know.
    #[must_use]
    pub fn normalized_for(mut self, guide: &Guide) -> Self {
        self.current_section = self.current_section.min(guide.last_index());
        self
    }
}

/// Task completion for one section (or for the whole guide).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionProgress {
    pub completed: usize,
    pub total: usize,
}

impl SectionProgress {
    #[must_use]
    pub fn for_section(section: &Section, state: &SessionState) -> Self {
        let tasks = section.tasks();
        let completed = tasks
            .iter()
            .filter(|task| state.is_task_completed(&task.id))
            .count();
        Self {
            completed,
            total: tasks.len(),
        }
    }

    /// A section without tasks is never complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    #[must_use]
    pub fn has_tasks(&self) -> bool {
        self.total > 0
    }

    /// Completed share in `[0, 1]`; `0.0` when there are no tasks.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64).clamp(0.0, 1.0)
    }
}

/// Whole-number percentage for a fraction, rounded and clamped to `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

impl std::ops::Add for SectionProgress {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            completed: self.completed + rhs.completed,
            total: self.total + rhs.total,
        }
    }
}
