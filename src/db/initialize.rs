use rusqlite::{Connection, OptionalExtension, Result};
use tracing::debug;

/// Create the `saved_times` table if it is missing.
///
/// `id` and `created_at` are filled in by SQLite itself so the local store
/// behaves like the hosted one: the client only ever writes `time_record`.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS saved_times (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            time_record TEXT NOT NULL,
            created_at  TEXT NOT NULL
                        DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_saved_times_created_at
            ON saved_times(created_at);
        "#,
    )?;

    debug!("saved_times table ready");
    Ok(())
}

/// Check whether the `saved_times` table exists.
pub fn saved_times_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='saved_times'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}
