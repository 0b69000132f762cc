//! The entity store handle: one serialized writer plus optional readers.

pub mod pool;
pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use apron_core::config::StorageConfig;
use apron_core::errors::StorageError;
use rusqlite::{Connection, Transaction};

use self::pool::ReadPool;
use self::pragmas::apply_pragmas;
use crate::migrations;

/// Owns every connection to the store. Writes (and transactions) are
/// serialized through one connection.
///
/// In-memory databases have no read pool: separate in-memory connections are
/// separate databases, so reads go through the writer.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: Option<ReadPool>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open the store described by `config`.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        match config.effective_db_path() {
            Some(path) => Self::open(&path, config.effective_read_pool_size()),
            None => Self::open_in_memory(),
        }
    }

    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::SqliteError {
                    message: format!("create {}: {e}", parent.display()),
                })?;
            }
        }

        let writer = prepare_writer(Connection::open(path))?;

        let readers = ReadPool::open(path, read_pool_size)?;
        tracing::info!(path = %path.display(), readers = readers.size(), "opened entity store");

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
            path: Some(path.to_path_buf()),
        })
    }

    /// Private in-memory store, used by tests and when no path is configured.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = prepare_writer(Connection::open_in_memory())?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            path: None,
        })
    }

    /// Execute a write operation with the serialized writer connection,
    /// outside any explicit transaction.
    pub fn with_writer<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<StorageError>,
    {
        f(&*self.lock_writer()?)
    }

    /// Execute `f` inside one BEGIN IMMEDIATE transaction on the writer.
    /// Commits when `f` succeeds, rolls back otherwise.
    pub fn with_transaction<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<StorageError>,
    {
        writer::with_immediate_transaction(&mut *self.lock_writer()?, f)
    }

    /// Execute a read operation on the best available connection.
    pub fn with_reader<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<StorageError>,
    {
        match &self.readers {
            Some(pool) => pool.with_conn(f),
            None => self.with_writer(f),
        }
    }

    /// Database file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "writer mutex poisoned".to_string(),
        })
    }
}

/// Apply pragmas and bring the schema up to date.
fn prepare_writer(opened: rusqlite::Result<Connection>) -> Result<Connection, StorageError> {
    let conn = opened.map_err(StorageError::from_sqlite)?;
    apply_pragmas(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
