//! Queries for the seeded incident_statuses table.

use apron_core::errors::StorageError;
use apron_core::ids::StatusId;
use apron_core::models::IncidentStatus;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn map_status(row: &Row<'_>) -> rusqlite::Result<IncidentStatus> {
    Ok(IncidentStatus {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

pub fn get_status(conn: &Connection, id: StatusId) -> Result<Option<IncidentStatus>, StorageError> {
    conn.query_row(
        "SELECT id, name, description FROM incident_statuses WHERE id = ?1",
        params![id],
        map_status,
    )
    .optional()
    .map_err(StorageError::from_sqlite)
}

/// Case-insensitive lookup by status name.
pub fn find_status_by_name(conn: &Connection, name: &str) -> Result<Option<IncidentStatus>, StorageError> {
    conn.query_row(
        "SELECT id, name, description FROM incident_statuses
         WHERE LOWER(name) = LOWER(?1) ORDER BY id ASC LIMIT 1",
        params![name.trim()],
        map_status,
    )
    .optional()
    .map_err(StorageError::from_sqlite)
}

pub fn list_statuses(conn: &Connection) -> Result<Vec<IncidentStatus>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name, description FROM incident_statuses ORDER BY id ASC")
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt.query_map([], map_status).map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}
