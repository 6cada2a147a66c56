use std::sync::Arc;

use lab_core::model::{Guide, SectionProgress, SessionState, TaskId};
use lab_core::{SessionController, SubscriptionId, UnknownTaskPolicy};

use crate::error::GuideSessionError;
use crate::persister::{HydrationSource, PersistOutcome, ProgressPersister};
use crate::report::ProgressReport;

/// A single user action against the guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideIntent {
    GoTo(usize),
    Next,
    Previous,
    Toggle(TaskId),
}

/// What a dispatched intent changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Navigation finished on this section index.
    Section(usize),
    /// The toggled task is now in this completion state.
    Task(bool),
}

/// Owns the session controller for one guide and keeps the store in sync.
///
/// The `async` mutators write the full state before returning. `dispatch` only
/// mutates; callers that use it attach their own persistence via `subscribe`.
pub struct GuideSessionService {
    controller: SessionController,
    persister: ProgressPersister,
    source: HydrationSource,
    last_persist: Option<PersistOutcome>,
}

impl GuideSessionService {
    /// Resume the stored session for `guide`, falling back to defaults.
    pub async fn hydrate(guide: Arc<Guide>, persister: ProgressPersister) -> Self {
        let (state, source) = persister.load(&guide).await;
        tracing::info!(
            ?source,
            section = state.current_section,
            sections = guide.len(),
            "session hydrated"
        );
        Self {
            controller: SessionController::with_state(guide, state),
            persister,
            source,
            last_persist: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnknownTaskPolicy) -> Self {
        self.controller = self.controller.with_policy(policy);
        self
    }

    #[must_use]
    pub fn hydration_source(&self) -> HydrationSource {
        self.source
    }

    /// Outcome of the most recent save, `None` before the first one.
    #[must_use]
    pub fn last_persist(&self) -> Option<PersistOutcome> {
        self.last_persist
    }

    #[must_use]
    pub fn persister(&self) -> &ProgressPersister {
        &self.persister
    }

    #[must_use]
    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    #[must_use]
    pub fn guide(&self) -> &Arc<Guide> {
        self.controller.guide()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        self.controller.state()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SessionState) + 'static) -> SubscriptionId {
        self.controller.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.controller.unsubscribe(id)
    }

    //
    // ─── MUTATIONS ─────────────────────────────────────────────────────────────
    //

    /// Apply `intent` in memory and notify subscribers, without saving.
    ///
    /// # Errors
    ///
    /// Returns `GuideSessionError::Session` when the controller rejects a toggle.
    pub fn dispatch(&mut self, intent: &GuideIntent) -> Result<IntentOutcome, GuideSessionError> {
        let outcome = match intent {
            GuideIntent::GoTo(index) => IntentOutcome::Section(self.controller.go_to_section(*index)),
            GuideIntent::Next => IntentOutcome::Section(self.controller.next_section()),
            GuideIntent::Previous => IntentOutcome::Section(self.controller.previous_section()),
            GuideIntent::Toggle(task) => IntentOutcome::Task(self.controller.toggle_task(task)?),
        };
        Ok(outcome)
    }

    /// Apply `intent` and write the full state before returning.
    ///
    /// # Errors
    ///
    /// Returns `GuideSessionError::Session` when the controller rejects a toggle.
    /// Save failures are logged and surface only through `last_persist`.
    pub async fn dispatch_persisted(
        &mut self,
        intent: &GuideIntent,
    ) -> Result<IntentOutcome, GuideSessionError> {
        let outcome = self.dispatch(intent)?;
        self.persist().await;
        Ok(outcome)
    }

    pub async fn go_to_section(&mut self, index: usize) -> usize {
        let index = self.controller.go_to_section(index);
        self.persist().await;
        index
    }

    pub async fn next_section(&mut self) -> usize {
        let index = self.controller.next_section();
        self.persist().await;
        index
    }

    pub async fn previous_section(&mut self) -> usize {
        let index = self.controller.previous_section();
        self.persist().await;
        index
    }

    /// # Errors
    ///
    /// Returns `GuideSessionError::Session` under `UnknownTaskPolicy::Reject`
    /// for an id no section declares.
    pub async fn toggle_task(&mut self, task: &TaskId) -> Result<bool, GuideSessionError> {
        let completed = self.controller.toggle_task(task)?;
        self.persist().await;
        Ok(completed)
    }

    /// Clear the store and return to the first section with nothing completed.
    ///
    /// The in-memory reset happens even if the store cannot be cleared.
    pub async fn reset_progress(&mut self) -> PersistOutcome {
        let cleared = self.persister.clear().await.is_ok();
        self.controller.replace_state(SessionState::default());
        let outcome = if cleared {
            PersistOutcome::Saved
        } else {
            PersistOutcome::Failed
        };
        self.last_persist = Some(outcome);
        outcome
    }

    async fn persist(&mut self) -> PersistOutcome {
        let outcome = self.persister.save(self.controller.state()).await;
        self.last_persist = Some(outcome);
        outcome
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn current_section(&self) -> usize {
        self.controller.current_section()
    }

    #[must_use]
    pub fn section_progress(&self, index: usize) -> Option<SectionProgress> {
        self.controller.section_progress(index)
    }

    #[must_use]
    pub fn is_section_complete(&self, index: usize) -> bool {
        self.controller.is_section_complete(index)
    }

    #[must_use]
    pub fn overall_progress_fraction(&self) -> f64 {
        self.controller.overall_progress_fraction()
    }

    #[must_use]
    pub fn report(&self) -> ProgressReport {
        ProgressReport::from_controller(&self.controller)
    }
}
