#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod guide_session;
pub mod persister;
pub mod report;

pub use lab_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, GuideSessionError, PersistError};
pub use guide_session::{GuideIntent, GuideSessionService, IntentOutcome};
pub use persister::{HydrationSource, PersistOutcome, ProgressPersister};
pub use report::{ProgressReport, SectionReport};
