use std::sync::Arc;

use lab_core::model::Guide;
use lab_core::{Clock, UnknownTaskPolicy};
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::guide_session::GuideSessionService;
use crate::persister::ProgressPersister;

/// Assembles app-facing services for one guide.
#[derive(Clone)]
pub struct AppServices {
    guide: Arc<Guide>,
    persister: ProgressPersister,
    policy: UnknownTaskPolicy,
}

impl AppServices {
    #[must_use]
    pub fn new(guide: Arc<Guide>, storage: &Storage, clock: Clock) -> Self {
        Self {
            guide,
            persister: ProgressPersister::new(Arc::clone(&storage.progress), clock),
            policy: UnknownTaskPolicy::default(),
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        guide: Arc<Guide>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(guide, &storage, clock))
    }

    #[must_use]
    pub fn in_memory(guide: Arc<Guide>, clock: Clock) -> Self {
        Self::new(guide, &Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnknownTaskPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn guide(&self) -> Arc<Guide> {
        Arc::clone(&self.guide)
    }

    #[must_use]
    pub fn persister(&self) -> ProgressPersister {
        self.persister.clone()
    }

    /// Hydrate a session from the store.
    pub async fn start_session(&self) -> GuideSessionService {
        GuideSessionService::hydrate(self.guide(), self.persister())
            .await
            .with_policy(self.policy)
    }
}
