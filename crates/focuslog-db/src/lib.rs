//! SQLite persistence for focuslog. A single database file holds the three
//! tables (users, usage sessions, scheduled intentions); handlers go through
//! the query methods on [`Database`] and never touch SQL directly.

pub mod migrations;
pub mod models;
pub mod queries;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Timestamp format used for every datetime column. Lexicographic order of
/// this format matches chronological order, so ORDER BY on the TEXT column
/// is correct.
pub const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }
}

/// Current UTC time rendered in [`DATETIME_FMT`].
pub fn now_string() -> String {
    chrono::Utc::now().naive_utc().format(DATETIME_FMT).to_string()
}

/// Whether an error from a write is a SQLite constraint violation, e.g. an
/// insert that lost the race on a UNIQUE column.
pub fn is_constraint_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
