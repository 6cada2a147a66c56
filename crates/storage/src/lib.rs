#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, PROGRESS_KEY, ProgressRecord, ProgressRepository, Storage, StorageError,
};
