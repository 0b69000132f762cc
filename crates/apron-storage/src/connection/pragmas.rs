//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 5s busy_timeout, foreign_keys ON.

use apron_core::errors::StorageError;
use rusqlite::Connection;

/// Apply pragmas to the writer connection.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(StorageError::from_sqlite)
}

/// Apply pragmas to a read-only pool connection.
pub fn apply_read_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA query_only = ON;
        ",
    )
    .map_err(StorageError::from_sqlite)
}

/// Verify that foreign key enforcement is active on a connection.
pub fn foreign_keys_enabled(conn: &Connection) -> Result<bool, StorageError> {
    let enabled: i64 = conn
        .pragma_query_value(None, "foreign_keys", |row| row.get(0))
        .map_err(StorageError::from_sqlite)?;
    Ok(enabled == 1)
}
