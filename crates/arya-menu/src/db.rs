//! Menu database connection management.
//!
//! Wraps a single rusqlite Connection in a Mutex for thread-safe access
//! and creates the menu schema on open.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use arya_core::error::AryaError;

/// Thread-safe SQLite wrapper for the mess-menu table.
///
/// The connection is wrapped in a Mutex since rusqlite Connection is
/// not Sync. WAL mode keeps concurrent readers safe.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the menu database at the given path.
    pub fn open(path: &Path) -> Result<Self, AryaError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| AryaError::MenuUnavailable(format!("Failed to open database: {}", e)))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )
        .map_err(|e| AryaError::MenuUnavailable(format!("Failed to set pragmas: {}", e)))?;

        info!("Menu database opened at {}", path.display());

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.with_conn(create_schema)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, AryaError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AryaError::MenuUnavailable(format!("Failed to open in-memory db: {}", e)))?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.with_conn(create_schema)?;
        Ok(db)
    }

    /// Execute a closure with a reference to the underlying connection.
    ///
    /// The mutex is held for the duration of the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, AryaError>
    where
        F: FnOnce(&Connection) -> Result<T, AryaError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AryaError::MenuUnavailable(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}

/// One row per day; `day_of_week` is the unique key.
fn create_schema(conn: &Connection) -> Result<(), AryaError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS menu (
            day_of_week   TEXT PRIMARY KEY NOT NULL
                          CHECK (day_of_week IN ('Sunday', 'Monday', 'Tuesday',
                                 'Wednesday', 'Thursday', 'Friday', 'Saturday')),
            morning_menu  TEXT NOT NULL DEFAULT '',
            evening_menu  TEXT NOT NULL DEFAULT '',
            night_menu    TEXT NOT NULL DEFAULT '',
            dessert       TEXT NOT NULL DEFAULT 'OFF'
        );",
    )
    .map_err(|e| AryaError::MenuUnavailable(format!("Failed to create menu table: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_database_opens() {
        let db = Database::in_memory().unwrap();
        let count: i64 = db
            .with_conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM menu", [], |row| row.get(0))
                    .map_err(|e| AryaError::MenuUnavailable(e.to_string()))
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("menu.db");
        let db = Database::open(&path).unwrap();
        drop(db);
        assert!(path.exists());
    }

    #[test]
    fn test_schema_rejects_unknown_day() {
        let db = Database::in_memory().unwrap();
        let result = db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO menu (day_of_week, morning_menu) VALUES ('Payday', 'x')",
                [],
            )
            .map_err(|e| AryaError::MenuUnavailable(e.to_string()))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.db");
        Database::open(&path).unwrap();
        // Reopen the same file; CREATE IF NOT EXISTS must not fail.
        Database::open(&path).unwrap();
    }
}
