//! Local file-backed table store.

use super::{RecordStore, StoreError};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::models::{NewSavedTime, SavedTimeRecord};
use async_trait::async_trait;
use rusqlite::{Row, params};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

pub struct SqliteStore {
    pool: Mutex<DbPool>,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the table exists.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Self::with_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_pool(DbPool::in_memory()?)
    }

    fn with_pool(pool: DbPool) -> Result<Self, StoreError> {
        init_db(&pool.conn)?;
        Ok(Self {
            pool: Mutex::new(pool),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, DbPool>, StoreError> {
        self.pool.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn map_row(row: &Row) -> rusqlite::Result<SavedTimeRecord> {
    Ok(SavedTimeRecord {
        id: row.get("id")?,
        time_record: row.get("time_record")?,
        created_at: row.get("created_at")?,
    })
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn insert(&self, row: &NewSavedTime) -> Result<SavedTimeRecord, StoreError> {
        let mut pool = self.lock()?;
        let saved = pool.with_conn(|conn| {
            conn.query_row(
                "INSERT INTO saved_times (time_record)
                 VALUES (?1)
                 RETURNING id, time_record, created_at",
                params![row.time_record],
                map_row,
            )
        })?;

        debug!(id = saved.id, time_record = %saved.time_record, "row inserted");
        Ok(saved)
    }

    async fn select_newest_first(&self) -> Result<Vec<SavedTimeRecord>, StoreError> {
        let mut pool = self.lock()?;
        let rows = pool.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, time_record, created_at
                 FROM saved_times
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt.query_map([], map_row)?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })?;

        debug!(count = rows.len(), "rows fetched");
        Ok(rows)
    }
}
