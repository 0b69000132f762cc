//! Schema migrations tracked in `PRAGMA user_version`.
//!
//! Each step runs in its own transaction together with the version bump, so a
//! failed step leaves the schema at the previous version.

pub mod v001_initial;
pub mod v002_statuses;

use apron_core::errors::StorageError;
use rusqlite::Connection;

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration { version: 1, sql: v001_initial::MIGRATION_SQL },
    Migration { version: 2, sql: v002_statuses::MIGRATION_SQL },
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the stored version.
/// Returns how many were applied.
pub fn run_migrations(conn: &Connection) -> Result<usize, StorageError> {
    let from = current_version(conn).map_err(|e| StorageError::MigrationFailed {
        version: 0,
        message: e.to_string(),
    })?;

    let pending = MIGRATIONS.iter().filter(|m| m.version > from);
    let mut applied = 0;
    for migration in pending {
        apply(conn, migration).map_err(|e| StorageError::MigrationFailed {
            version: migration.version,
            message: e.to_string(),
        })?;
        tracing::info!(version = migration.version, "schema migrated");
        applied += 1;
    }
    Ok(applied)
}

fn apply(conn: &Connection, migration: &Migration) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)?;
    tx.commit()
}

/// Schema version stored in the database file.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(StorageError::from_sqlite)
}
