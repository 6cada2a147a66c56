use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{SectionId, TaskId};
use crate::model::section::{Section, SectionDraft, SectionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuideError {
    #[error("guide must contain at least one section")]
    Empty,

    #[error("guide title cannot be empty")]
    EmptyTitle,

    #[error("duplicate section id `{0}`")]
    DuplicateSection(SectionId),

    #[error("task id `{0}` appears more than once")]
    DuplicateTask(TaskId),

    #[error(transparent)]
    Section(#[from] SectionError),

    #[error("guide content could not be parsed: {0}")]
    Parse(String),
}

/// Unvalidated guide, as stored in a content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub sections: Vec<SectionDraft>,
}

impl GuideDraft {
    /// # Errors
    ///
    /// Returns `GuideError` if the guide is empty, any section is invalid, or
    /// section/task ids collide.
    pub fn validate(self) -> Result<Guide, GuideError> {
        if self.title.trim().is_empty() {
            return Err(GuideError::EmptyTitle);
        }
        let sections = self
            .sections
            .into_iter()
            .map(SectionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Guide::build(self.title, self.subtitle, sections)
    }
}

/// The ordered, immutable content store.
///
/// Always holds at least one section, and every task id is unique across all
/// sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guide {
    title: String,
    subtitle: Option<String>,
    sections: Vec<Section>,
    task_sections: HashMap<TaskId, usize>,
}

impl Guide {
    /// Build a guide from already-validated sections.
    ///
    /// # Errors
    ///
    /// Returns `GuideError::Empty` for no sections, or a duplicate-id error.
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Result<Self, GuideError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(GuideError::EmptyTitle);
        }
        Self::build(title, None, sections)
    }

    fn build(
        title: String,
        subtitle: Option<String>,
        sections: Vec<Section>,
    ) -> Result<Self, GuideError> {
        if sections.is_empty() {
            return Err(GuideError::Empty);
        }

        let mut section_ids = HashSet::with_capacity(sections.len());
        let mut task_sections = HashMap::new();
        for (idx, section) in sections.iter().enumerate() {
            if !section_ids.insert(section.id().clone()) {
                return Err(GuideError::DuplicateSection(section.id().clone()));
            }
            for task in section.tasks() {
                if task_sections.insert(task.id.clone(), idx).is_some() {
                    return Err(GuideError::DuplicateTask(task.id.clone()));
                }
            }
        }

        Ok(Self {
            title,
            subtitle: subtitle.filter(|s| !s.trim().is_empty()),
            sections,
            task_sections,
        })
    }

    /// Parse and validate a guide from its JSON content file.
    ///
    /// # Errors
    ///
    /// Returns `GuideError::Parse` for malformed JSON, or a validation error.
    pub fn from_json_str(raw: &str) -> Result<Self, GuideError> {
        let draft: GuideDraft =
            serde_json::from_str(raw).map_err(|err| GuideError::Parse(err.to_string()))?;
        draft.validate()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Number of sections; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.sections.len() - 1
    }

    /// Index of the section that owns `task`, if any.
    #[must_use]
    pub fn section_of_task(&self, task: &TaskId) -> Option<usize> {
        self.task_sections.get(task).copied()
    }

    #[must_use]
    pub fn contains_task(&self, task: &TaskId) -> bool {
        self.task_sections.contains_key(task)
    }

    #[must_use]
    pub fn total_task_count(&self) -> usize {
        self.task_sections.len()
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &TaskId> {
        self.sections
            .iter()
            .flat_map(|section| section.tasks().iter().map(|task| &task.id))
    }
}
