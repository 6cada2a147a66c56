use std::sync::Arc;

use lab_core::Clock;
use lab_core::model::{Guide, SessionState};
use storage::repository::{ProgressRecord, ProgressRepository, StorageError};

use crate::error::PersistError;

/// Where a hydrated session's state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// A stored record was decoded and used.
    Stored,
    /// Nothing was stored yet.
    Empty,
    /// A stored record existed but was malformed; defaults were used.
    Discarded,
    /// The store could not be read; defaults were used.
    Unavailable,
}

/// Result of a best-effort save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved,
    Failed,
}

impl PersistOutcome {
    #[must_use]
    pub fn is_saved(self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Bridges session state to a `ProgressRepository`.
///
/// Loads never fail: anything unusable becomes the default state. Saves never
/// propagate: failures are logged and reported as `PersistOutcome::Failed`.
#[derive(Clone)]
pub struct ProgressPersister {
    repo: Arc<dyn ProgressRepository>,
    clock: Clock,
}

impl ProgressPersister {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>, clock: Clock) -> Self {
        Self { repo, clock }
    }

    /// Load the stored state for `guide`, clamped into its bounds.
    pub async fn load(&self, guide: &Guide) -> (SessionState, HydrationSource) {
        match self.repo.load_progress().await {
            Ok(Some(record)) => (
                record.into_state().normalized_for(guide),
                HydrationSource::Stored,
            ),
            Ok(None) => (SessionState::default(), HydrationSource::Empty),
            Err(err) if err.is_malformed() => {
                tracing::warn!(error = %err, "discarding malformed progress record");
                (SessionState::default(), HydrationSource::Discarded)
            }
            Err(err) => {
                tracing::warn!(error = %err, "progress store unavailable, starting fresh");
                (SessionState::default(), HydrationSource::Unavailable)
            }
        }
    }

    /// Write the full state. Failures are logged, never returned.
    pub async fn save(&self, state: &SessionState) -> PersistOutcome {
        let record = ProgressRecord::from_state(state, self.clock.now());
        match self.repo.save_progress(&record).await {
            Ok(()) => {
                tracing::trace!(
                    section = state.current_section,
                    tasks = state.completed_tasks.len(),
                    "progress saved"
                );
                PersistOutcome::Saved
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist progress");
                PersistOutcome::Failed
            }
        }
    }

    /// Remove the stored record.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the store rejects the delete. Unlike `save`,
    /// an explicit reset is a user request and reports its failure.
    pub async fn clear(&self) -> Result<(), PersistError> {
        self.repo.clear_progress().await.map_err(|err: StorageError| {
            tracing::error!(error = %err, "failed to clear progress");
            PersistError::from(err)
        })
    }
}
