//! Queries for the incidents table.
//!
//! "Open" means the incident's status name is not one of
//! [`TERMINAL_STATUS_NAMES`]; the predicate is evaluated in SQL on every call,
//! so answers always reflect the committed status and assignee.

use apron_core::constants::TERMINAL_STATUS_NAMES;
use apron_core::errors::StorageError;
use apron_core::ids::{EmployeeId, IncidentId, StatusId};
use apron_core::models::{Incident, NewIncident};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const INCIDENT_COLUMNS: &str = "i.id, i.title, i.description, i.incident_type, i.incident_datetime,
     i.location_id, i.assigned_employee_id, i.status_id, i.conclusion, i.created_at, i.updated_at";

fn map_incident(row: &Row<'_>) -> rusqlite::Result<Incident> {
    Ok(Incident {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        incident_type: row.get(3)?,
        incident_datetime: row.get(4)?,
        location_id: row.get(5)?,
        assigned_employee_id: row.get(6)?,
        status_id: row.get(7)?,
        conclusion: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

/// `LOWER(TRIM(s.name)) NOT IN (?2, ?3, ...)`, placeholders starting at `first`.
fn open_status_predicate(first: usize) -> String {
    let placeholders = (0..TERMINAL_STATUS_NAMES.len())
        .map(|i| format!("?{}", first + i))
        .collect::<Vec<_>>()
        .join(", ");
    format!("LOWER(TRIM(s.name)) NOT IN ({placeholders})")
}

/// Query parameters: employee id followed by the terminal status names.
fn employee_open_params(employee_id: EmployeeId) -> Vec<rusqlite::types::Value> {
    let mut values = vec![rusqlite::types::Value::Integer(employee_id.get())];
    values.extend(
        TERMINAL_STATUS_NAMES
            .iter()
            .map(|name| rusqlite::types::Value::Text(name.to_ascii_lowercase())),
    );
    values
}

/// Insert an incident with the given status. `created_at` also seeds
/// `updated_at`, and the occurrence time when the caller supplied none.
pub fn insert_incident(
    conn: &Connection,
    incident: &NewIncident,
    status_id: StatusId,
    created_at: i64,
) -> Result<IncidentId, StorageError> {
    conn.execute(
        "INSERT INTO incidents (title, description, incident_type, incident_datetime,
                                location_id, assigned_employee_id, status_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        params![
            incident.title,
            incident.description,
            incident.incident_type,
            incident.incident_datetime.unwrap_or(created_at),
            incident.location_id,
            incident.assigned_employee_id,
            status_id,
            created_at,
        ],
    )
    .map_err(StorageError::from_sqlite)?;
    Ok(IncidentId(conn.last_insert_rowid()))
}

pub fn get_incident(conn: &Connection, id: IncidentId) -> Result<Option<Incident>, StorageError> {
    conn.query_row(
        &format!("SELECT {INCIDENT_COLUMNS} FROM incidents i WHERE i.id = ?1"),
        params![id],
        map_incident,
    )
    .optional()
    .map_err(StorageError::from_sqlite)
}

/// All incidents, most recent occurrence first.
pub fn list_incidents(conn: &Connection) -> Result<Vec<Incident>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents i
             ORDER BY i.incident_datetime DESC, i.id DESC"
        ))
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt.query_map([], map_incident).map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}

/// Every incident assigned to `employee_id`, most recent occurrence first.
pub fn list_incidents_for_employee(
    conn: &Connection,
    employee_id: EmployeeId,
) -> Result<Vec<Incident>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents i
             WHERE i.assigned_employee_id = ?1
             ORDER BY i.incident_datetime DESC, i.id DESC"
        ))
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt
        .query_map(params![employee_id], map_incident)
        .map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}

/// Open incidents assigned to `employee_id`, id ascending.
pub fn open_incidents_for_employee(
    conn: &Connection,
    employee_id: EmployeeId,
) -> Result<Vec<Incident>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents i
             JOIN incident_statuses s ON s.id = i.status_id
             WHERE i.assigned_employee_id = ?1 AND {}
             ORDER BY i.id ASC",
            open_status_predicate(2)
        ))
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt
        .query_map(params_from_iter(employee_open_params(employee_id)), map_incident)
        .map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}

/// The lowest-id open incident of `employee_id` with its status name.
pub fn first_open_incident_for_employee(
    conn: &Connection,
    employee_id: EmployeeId,
) -> Result<Option<(Incident, String)>, StorageError> {
    conn.query_row(
        &format!(
            "SELECT {INCIDENT_COLUMNS}, s.name FROM incidents i
             JOIN incident_statuses s ON s.id = i.status_id
             WHERE i.assigned_employee_id = ?1 AND {}
             ORDER BY i.id ASC LIMIT 1",
            open_status_predicate(2)
        ),
        params_from_iter(employee_open_params(employee_id)),
        |row| Ok((map_incident(row)?, row.get::<_, String>(11)?)),
    )
    .optional()
    .map_err(StorageError::from_sqlite)
}

/// Number of open incidents assigned to `employee_id`.
pub fn count_open_incidents_for_employee(
    conn: &Connection,
    employee_id: EmployeeId,
) -> Result<i64, StorageError> {
    conn.query_row(
        &format!(
            "SELECT COUNT(*) FROM incidents i
             JOIN incident_statuses s ON s.id = i.status_id
             WHERE i.assigned_employee_id = ?1 AND {}",
            open_status_predicate(2)
        ),
        params_from_iter(employee_open_params(employee_id)),
        |row| row.get(0),
    )
    .map_err(StorageError::from_sqlite)
}

/// Write back the editable descriptive fields.
pub fn update_incident_fields(
    conn: &Connection,
    incident: &Incident,
    updated_at: i64,
) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE incidents SET
            title = ?1, description = ?2, incident_type = ?3,
            incident_datetime = ?4, location_id = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            incident.title,
            incident.description,
            incident.incident_type,
            incident.incident_datetime,
            incident.location_id,
            updated_at,
            incident.id,
        ],
    )
    .map_err(StorageError::from_sqlite)
}

pub fn set_assignee(
    conn: &Connection,
    id: IncidentId,
    employee_id: Option<EmployeeId>,
    updated_at: i64,
) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE incidents SET assigned_employee_id = ?1, updated_at = ?2 WHERE id = ?3",
        params![employee_id, updated_at, id],
    )
    .map_err(StorageError::from_sqlite)
}

pub fn set_status(
    conn: &Connection,
    id: IncidentId,
    status_id: StatusId,
    updated_at: i64,
) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE incidents SET status_id = ?1, updated_at = ?2 WHERE id = ?3",
        params![status_id, updated_at, id],
    )
    .map_err(StorageError::from_sqlite)
}

/// Set status and conclusion reference together.
pub fn set_status_with_conclusion(
    conn: &Connection,
    id: IncidentId,
    status_id: StatusId,
    conclusion: &str,
    updated_at: i64,
) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE incidents SET status_id = ?1, conclusion = ?2, updated_at = ?3 WHERE id = ?4",
        params![status_id, conclusion, updated_at, id],
    )
    .map_err(StorageError::from_sqlite)
}

/// Delete an incident; its child rows go with it.
pub fn delete_incident(conn: &Connection, id: IncidentId) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM incidents WHERE id = ?1", params![id])
        .map_err(StorageError::from_sqlite)
}
