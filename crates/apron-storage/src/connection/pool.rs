//! Read-only connections handed out in rotation.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use apron_core::constants::MAX_READ_POOL_SIZE;
use apron_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};

use super::pragmas::apply_read_pragmas;

/// Fixed set of `query_only` connections to one database file.
pub struct ReadPool {
    readers: Box<[Mutex<Connection>]>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `size` readers, clamped to `1..=MAX_READ_POOL_SIZE`.
    pub fn open(path: &Path, size: usize) -> Result<Self, StorageError> {
        let readers = (0..size.clamp(1, MAX_READ_POOL_SIZE))
            .map(|_| open_reader(path).map(Mutex::new))
            .collect::<Result<Vec<_>, _>>()?
            .into_boxed_slice();
        Ok(Self {
            readers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the next reader in rotation.
    pub fn with_conn<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<StorageError>,
    {
        let slot = &self.readers[self.cursor.fetch_add(1, Ordering::Relaxed) % self.readers.len()];
        let conn = slot.lock().map_err(|_| StorageError::SqliteError {
            message: "reader lock poisoned".to_string(),
        })?;
        f(&conn)
    }

    pub fn size(&self) -> usize {
        self.readers.len()
    }
}

fn open_reader(path: &Path) -> Result<Connection, StorageError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(StorageError::from_sqlite)?;
    apply_read_pragmas(&conn)?;
    Ok(conn)
}
