//! Shared error types for the services crate.

use thiserror::Error;

use lab_core::SessionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `GuideSessionService`.
///
/// Persistence failures never show up here: saves are best-effort and only
/// logged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GuideSessionError {
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted by `ProgressPersister` operations that are allowed to fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
