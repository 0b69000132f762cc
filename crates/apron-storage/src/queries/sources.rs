//! Queries for incident_sources: who or what reported an incident.

use apron_core::errors::StorageError;
use apron_core::ids::{IncidentId, SourceId};
use apron_core::models::{IncidentSource, NewSource};
use rusqlite::{params, Connection};

pub fn insert_source(
    conn: &Connection,
    incident_id: IncidentId,
    source: &NewSource,
) -> Result<SourceId, StorageError> {
    conn.execute(
        "INSERT INTO incident_sources (incident_id, source_type, source_description)
         VALUES (?1, ?2, ?3)",
        params![incident_id, source.source_type, source.source_description],
    )
    .map_err(StorageError::from_sqlite)?;
    Ok(SourceId(conn.last_insert_rowid()))
}

pub fn list_sources(conn: &Connection, incident_id: IncidentId) -> Result<Vec<IncidentSource>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, incident_id, source_type, source_description
             FROM incident_sources WHERE incident_id = ?1 ORDER BY id ASC",
        )
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt
        .query_map(params![incident_id], |row| {
            Ok(IncidentSource {
                id: row.get(0)?,
                incident_id: row.get(1)?,
                source_type: row.get(2)?,
                source_description: row.get(3)?,
            })
        })
        .map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}
