//! Best-effort key/value persistence for the display snapshot.

use std::path::Path;

use asciiwx_core::AppError;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

/// Keyed string persistence.
///
/// The contract is deliberately lossy: a read failure or absent key is an
/// empty string, a write failure is logged and swallowed. Refresh commits
/// must never fail because the disk does.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> String;
    fn set(&self, key: &str, value: &str);
}

/// SQLite-backed store with a single `state(key, value)` table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (and creates if needed) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(store_error)?;
        Self::with_connection(conn)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory().map_err(store_error)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, AppError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .map_err(store_error)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn store_error(e: rusqlite::Error) -> AppError {
    AppError::Store(e.to_string())
}

impl StateStore for SqliteStore {
    fn get(&self, key: &str) -> String {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT value FROM state WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional();
        match row {
            Ok(Some(value)) => value,
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!("State read failed for {}: {}", key, e);
                String::new()
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let conn = self.conn.lock();
        let result = conn.execute(
            "INSERT OR REPLACE INTO state (key, value) VALUES (?1, ?2)",
            params![key, value],
        );
        if let Err(e) = result {
            tracing::warn!("State write failed for {}: {}", key, e);
        }
    }
}
