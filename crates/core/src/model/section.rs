use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::block::{BlockError, ContentBlock};
use crate::model::ids::{SectionId, TaskId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SectionError {
    #[error("section id cannot be empty")]
    EmptyId,

    #[error("section `{section}` has an empty title")]
    EmptyTitle { section: SectionId },

    #[error("section `{section}` has a task with an empty id")]
    EmptyTaskId { section: SectionId },

    #[error("task `{task}` has an empty label")]
    EmptyTaskLabel { task: TaskId },

    #[error("section `{section}`, block {position}: {source}")]
    Block {
        section: SectionId,
        position: usize,
        #[source]
        source: BlockError,
    },
}

/// A single checklist item within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub label: String,
}

impl Task {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(id),
            label: label.into(),
        }
    }
}

//
// ─── DRAFT (unvalidated, as found in content files) ────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDraft {
    pub id: SectionId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl SectionDraft {
    /// Validate the draft into an immutable `Section`.
    ///
    /// # Errors
    ///
    /// Returns `SectionError` for blank ids, titles, task labels or invalid blocks.
    pub fn validate(self) -> Result<Section, SectionError> {
        if self.id.is_blank() {
            return Err(SectionError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(SectionError::EmptyTitle { section: self.id });
        }
        for task in &self.tasks {
            if task.id.is_blank() {
                return Err(SectionError::EmptyTaskId {
                    section: self.id.clone(),
                });
            }
            if task.label.trim().is_empty() {
                return Err(SectionError::EmptyTaskLabel {
                    task: task.id.clone(),
                });
            }
        }
        for (idx, block) in self.content.iter().enumerate() {
            block.validate().map_err(|source| SectionError::Block {
                section: self.id.clone(),
                position: idx + 1,
                source,
            })?;
        }

        Ok(Section {
            id: self.id,
            title: self.title,
            subtitle: self.subtitle.filter(|s| !s.trim().is_empty()),
            duration: self.duration,
            tasks: self.tasks,
            content: self.content,
        })
    }
}

//
// ─── VALIDATED ENTITY ──────────────────────────────────────────────────────────
//

/// One page of the lab guide. Its position in the guide is its ordinal identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: SectionId,
    title: String,
    subtitle: Option<String>,
    duration: String,
    tasks: Vec<Task>,
    content: Vec<ContentBlock>,
}

impl Section {
    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
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
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn content(&self) -> &[ContentBlock] {
        &self.content
    }

    #[must_use]
    pub fn has_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    #[must_use]
    pub fn has_task(&self, id: &TaskId) -> bool {
        self.tasks.iter().any(|t| &t.id == id)
    }
}
