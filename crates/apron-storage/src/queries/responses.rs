//! Queries for incident_responses: append-only log of actions taken.

use apron_core::errors::StorageError;
use apron_core::ids::{EmployeeId, IncidentId, ResponseId};
use apron_core::models::{IncidentResponse, NewResponse};
use rusqlite::{params, Connection};

pub fn insert_response(
    conn: &Connection,
    incident_id: IncidentId,
    response: &NewResponse,
    performed_by: Option<EmployeeId>,
    at: i64,
) -> Result<ResponseId, StorageError> {
    conn.execute(
        "INSERT INTO incident_responses (incident_id, action_taken, performed_by_id, response_datetime)
         VALUES (?1, ?2, ?3, ?4)",
        params![incident_id, response.action_taken, performed_by, at],
    )
    .map_err(StorageError::from_sqlite)?;
    Ok(ResponseId(conn.last_insert_rowid()))
}

/// Responses of one incident in the order they were recorded.
pub fn list_responses(
    conn: &Connection,
    incident_id: IncidentId,
) -> Result<Vec<IncidentResponse>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, incident_id, action_taken, performed_by_id, response_datetime
             FROM incident_responses WHERE incident_id = ?1 ORDER BY id ASC",
        )
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt
        .query_map(params![incident_id], |row| {
            Ok(IncidentResponse {
                id: row.get(0)?,
                incident_id: row.get(1)?,
                action_taken: row.get(2)?,
                performed_by_id: row.get(3)?,
                response_datetime: row.get(4)?,
            })
        })
        .map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}
