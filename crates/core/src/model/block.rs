use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Language shown for code samples that do not declare one.
pub const DEFAULT_CODE_LANGUAGE: &str = "bash";

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("{kind} block must carry a non-empty value.")]
    EmptyValue { kind: &'static str },

    #[error("list block must contain at least one item.")]
    EmptyList,

    #[error("steps block must contain at least one step.")]
    EmptySteps,

    #[error("step {position} has an empty title.")]
    UntitledStep { position: usize },
}

//
// ─── BLOCK TYPES ───────────────────────────────────────────────────────────────
//

/// Visual tone of a callout box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutVariant {
    #[default]
    Info,
    Warning,
    Success,
}

impl CalloutVariant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

/// One numbered step inside a `steps` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Step {
    #[must_use]
    pub fn language_or_default(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_CODE_LANGUAGE)
    }
}

/// A renderable unit within a section body.
///
/// Each kind carries only the fields it needs, so a `code` block without a value
/// or a `list` with a `variant` cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text {
        value: String,
    },
    List {
        items: Vec<String>,
    },
    Code {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Callout {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default)]
        variant: CalloutVariant,
    },
    Steps {
        steps: Vec<Step>,
    },
}

impl ContentBlock {
    /// The schema tag for this block.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::List { .. } => "list",
            Self::Code { .. } => "code",
            Self::Callout { .. } => "callout",
            Self::Steps { .. } => "steps",
        }
    }

    /// Check the invariants serde cannot express (non-empty values and lists).
    ///
    /// # Errors
    ///
    /// Returns `BlockError` describing the first violation.
    pub fn validate(&self) -> Result<(), BlockError> {
        match self {
            Self::Text { value } | Self::Code { value, .. } | Self::Callout { value, .. } => {
                if value.trim().is_empty() {
                    return Err(BlockError::EmptyValue { kind: self.kind() });
                }
                Ok(())
            }
            Self::List { items } => {
                if items.is_empty() {
                    return Err(BlockError::EmptyList);
                }
                Ok(())
            }
            Self::Steps { steps } => {
                if steps.is_empty() {
                    return Err(BlockError::EmptySteps);
                }
                if let Some(position) = steps.iter().position(|s| s.title.trim().is_empty()) {
                    return Err(BlockError::UntitledStep {
                        position: position + 1,
                    });
                }
                Ok(())
            }
        }
    }

    /// Language for `code` blocks, falling back to `bash`.
    #[must_use]
    pub fn code_language(&self) -> Option<&str> {
        match self {
            Self::Code { language, .. } => {
                Some(language.as_deref().unwrap_or(DEFAULT_CODE_LANGUAGE))
            }
            _ => None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
