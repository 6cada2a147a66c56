//! Navigation and checklist state machine over a read-only guide.
//!
//! `SessionController` is the only mutation surface for `SessionState`. Every
//! mutating call notifies subscribed listeners synchronously before it returns,
//! so persistence and rendering can both observe changes without the controller
//! knowing about either.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{Guide, SectionProgress, SessionState, TaskId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("task `{0}` does not belong to any section")]
    UnknownTask(TaskId),
}

/// What `toggle_task` does with an id no section declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTaskPolicy {
    /// Record the id anyway. Snapshots taken against newer content keep their
    /// completions when loaded against older content, and vice versa.
    #[default]
    Accept,
    /// Refuse the toggle with `SessionError::UnknownTask`.
    Reject,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SessionState)>;

pub struct SessionController {
    guide: Arc<Guide>,
    state: SessionState,
    policy: UnknownTaskPolicy,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("sections", &self.guide.len())
            .field("state", &self.state)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SessionController {
    /// Start at the first section with nothing completed.
    #[must_use]
    pub fn new(guide: Arc<Guide>) -> Self {
        Self::with_state(guide, SessionState::default())
    }

    /// Resume from a previously persisted state, clamped into the guide's bounds.
    #[must_use]
    pub fn with_state(guide: Arc<Guide>, state: SessionState) -> Self {
        let state = state.normalized_for(&guide);
        Self {
            guide,
            state,
            policy: UnknownTaskPolicy::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnknownTaskPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn guide(&self) -> &Arc<Guide> {
        &self.guide
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn current_section(&self) -> usize {
        self.state.current_section
    }

    #[must_use]
    pub fn is_task_completed(&self, task: &TaskId) -> bool {
        self.state.is_task_completed(task)
    }

    //
    // ─── OBSERVERS ─────────────────────────────────────────────────────────────
    //

    /// Register a listener called with the new state after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Jump to `index`, clamped to the last section. Returns the resulting index.
    pub fn go_to_section(&mut self, index: usize) -> usize {
        self.state.current_section = index.min(self.guide.last_index());
        self.notify();
        self.state.current_section
    }

    /// Move `delta` sections from the current one, clamped at both ends.
    pub fn step_by(&mut self, delta: isize) -> usize {
        let target = self.state.current_section.saturating_add_signed(delta);
        self.go_to_section(target)
    }

    pub fn next_section(&mut self) -> usize {
        self.step_by(1)
    }

    pub fn previous_section(&mut self) -> usize {
        self.step_by(-1)
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.state.current_section > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.state.current_section < self.guide.last_index()
    }

    //
    // ─── TASKS ─────────────────────────────────────────────────────────────────
    //

    /// Flip the completion flag for `task` and return its new value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownTask` only under `UnknownTaskPolicy::Reject`.
    pub fn toggle_task(&mut self, task: &TaskId) -> Result<bool, SessionError> {
        if self.policy == UnknownTaskPolicy::Reject && !self.guide.contains_task(task) {
            return Err(SessionError::UnknownTask(task.clone()));
        }
        let next = !self.state.is_task_completed(task);
        self.state.completed_tasks.insert(task.clone(), next);
        self.notify();
        Ok(next)
    }

    /// Swap in a whole new state, e.g. after progress was cleared.
    pub fn replace_state(&mut self, state: SessionState) {
        self.state = state.normalized_for(&self.guide);
        self.notify();
    }

    //
    // ─── DERIVED QUERIES ───────────────────────────────────────────────────────
    //

    /// `None` for an index past the last section.
    #[must_use]
    pub fn section_progress(&self, index: usize) -> Option<SectionProgress> {
        self.guide
            .section(index)
            .map(|section| SectionProgress::for_section(section, &self.state))
    }

    #[must_use]
    pub fn is_section_complete(&self, index: usize) -> bool {
        self.section_progress(index)
            .is_some_and(|progress| progress.is_complete())
    }

    /// Completion across every task in the guide.
    #[must_use]
    pub fn overall_task_progress(&self) -> SectionProgress {
        self.guide
            .sections()
            .iter()
            .map(|section| SectionProgress::for_section(section, &self.state))
            .fold(SectionProgress::default(), |acc, p| acc + p)
    }

    /// Position through the guide in `[0, 1]`; `0.0` for a single-section guide.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn overall_progress_fraction(&self) -> f64 {
        let last = self.guide.last_index();
        if last == 0 {
            return 0.0;
        }
        (self.state.current_section as f64 / last as f64).clamp(0.0, 1.0)
    }
}
