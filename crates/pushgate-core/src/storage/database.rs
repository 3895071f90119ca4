//! SQLite-backed activity history.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{data_dir, ActivityStore};
use crate::activity::ActivityRecord;
use crate::error::StoreError;

/// SQLite database holding the append-only activity history.
///
/// The connection sits behind a coarse lock so one `Database` value can serve
/// the recorder and decision paths concurrently.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the database at `<data_dir>/pushgate.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("pushgate.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            warn!("failed to enable WAL mode: {err}");
        }
        if let Err(err) = conn.pragma_update(None, "busy_timeout", 5000) {
            warn!("failed to set busy timeout: {err}");
        }

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn()
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS activity (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id     TEXT NOT NULL,
                    started_at  TEXT NOT NULL,
                    finished_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_activity_user_finished
                    ON activity(user_id, finished_at);
                CREATE INDEX IF NOT EXISTS idx_activity_user_started
                    ON activity(user_id, started_at);",
            )
            .map_err(|err| StoreError::MigrationFailed(err.to_string()))
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
        })
}

fn parse_user_id(idx: usize, value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
    })
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ActivityRecord> {
    let user_id: String = row.get(1)?;
    let started_at: String = row.get(2)?;
    let finished_at: String = row.get(3)?;
    Ok(ActivityRecord {
        id: row.get(0)?,
        user_id: parse_user_id(1, &user_id)?,
        started_at: parse_timestamp(2, &started_at)?,
        finished_at: parse_timestamp(3, &finished_at)?,
    })
}

impl ActivityStore for Database {
    fn insert(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<ActivityRecord, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO activity (user_id, started_at, finished_at) VALUES (?1, ?2, ?3)",
            params![user_id.to_string(), at.to_rfc3339(), at.to_rfc3339()],
        )?;
        Ok(ActivityRecord {
            id: conn.last_insert_rowid(),
            user_id,
            started_at: at,
            finished_at: at,
        })
    }

    fn update(&self, record: &ActivityRecord) -> Result<(), StoreError> {
        self.conn().execute(
            "UPDATE activity SET finished_at = ?1 WHERE id = ?2",
            params![record.finished_at.to_rfc3339(), record.id],
        )?;
        Ok(())
    }

    fn find_last_within(
        &self,
        user_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<ActivityRecord>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, started_at, finished_at FROM activity
             WHERE user_id = ?1 AND finished_at > ?2
             ORDER BY finished_at DESC
             LIMIT 1",
        )?;
        let record = stmt
            .query_row(params![user_id.to_string(), cutoff.to_rfc3339()], row_to_record)
            .optional()?;
        Ok(record)
    }

    fn find_last(&self, user_id: Uuid) -> Result<Option<ActivityRecord>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, started_at, finished_at FROM activity
             WHERE user_id = ?1
             ORDER BY finished_at DESC
             LIMIT 1",
        )?;
        let record = stmt
            .query_row(params![user_id.to_string()], row_to_record)
            .optional()?;
        Ok(record)
    }

    fn find_all_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityRecord>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, started_at, finished_at FROM activity
             WHERE user_id = ?1 AND started_at >= ?2
             ORDER BY started_at ASC",
        )?;

        let rows = stmt.query_map(
            params![user_id.to_string(), since.to_rfc3339()],
            row_to_record,
        )?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
