//! Storage-layer errors for SQLite operations.

use super::error_code::{self, ApronErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("database busy: {message}")]
    Busy { message: String },
}

impl StorageError {
    /// Wrap a rusqlite error, separating lock contention from other failures.
    pub fn from_sqlite(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
                Self::Busy {
                    message: err.to_string(),
                }
            }
            _ => Self::SqliteError {
                message: err.to_string(),
            },
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::from_sqlite(err)
    }
}

impl ApronErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy { .. } => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
        }
    }
}
