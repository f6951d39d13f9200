//! Bridge to the table store that keeps saved times.
//!
//! The stopwatch only needs two operations from its backend: insert one row
//! and read every row newest first. Both backends below expose exactly that.

pub mod rest;
pub mod sqlite;

use crate::config::{Backend, Config};
use crate::errors::AppResult;
use crate::models::{NewSavedTime, SavedTimeRecord};
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use rest::RestStore;
pub use sqlite::SqliteStore;

/// Errors reported by a [`RecordStore`].
///
/// `Display` is the human-readable text shown to the user when a save fails.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The service could not be reached or the transfer broke.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Parse(String),

    /// An insert succeeded but the service did not echo the new row.
    #[error("Store returned no row for the insert")]
    EmptyResponse,

    #[error("{0}")]
    Config(String),

    #[error("Store connection is unavailable")]
    Poisoned,
}

/// Minimal table-store interface consumed by the stopwatch.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Insert one row; `id` and `created_at` are assigned by the store.
    async fn insert(&self, row: &NewSavedTime) -> Result<SavedTimeRecord, StoreError>;

    /// Every row, ordered by `created_at` descending.
    async fn select_newest_first(&self) -> Result<Vec<SavedTimeRecord>, StoreError>;
}

/// Build the backend selected in the configuration.
pub fn open_store(cfg: &Config) -> AppResult<Box<dyn RecordStore>> {
    let store: Box<dyn RecordStore> = match cfg.backend {
        Backend::Sqlite => {
            let path = cfg.database_path();
            if let Some(parent) = Path::new(&path).parent() {
                fs::create_dir_all(parent)?;
            }
            Box::new(SqliteStore::open(&path)?)
        }
        Backend::Rest => Box::new(RestStore::from_config(&cfg.rest)?),
    };

    tracing::debug!(backend = store.name(), "record store opened");
    Ok(store)
}
