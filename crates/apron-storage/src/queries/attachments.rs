//! Queries for attachments: file references on an incident.

use apron_core::errors::StorageError;
use apron_core::ids::{AttachmentId, IncidentId};
use apron_core::models::{Attachment, NewAttachment};
use rusqlite::{params, Connection};

pub fn insert_attachment(
    conn: &Connection,
    incident_id: IncidentId,
    attachment: &NewAttachment,
    uploaded_at: i64,
) -> Result<AttachmentId, StorageError> {
    conn.execute(
        "INSERT INTO attachments (incident_id, file_url, uploaded_at) VALUES (?1, ?2, ?3)",
        params![incident_id, attachment.file_url, uploaded_at],
    )
    .map_err(StorageError::from_sqlite)?;
    Ok(AttachmentId(conn.last_insert_rowid()))
}

pub fn list_attachments(conn: &Connection, incident_id: IncidentId) -> Result<Vec<Attachment>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, incident_id, file_url, uploaded_at
             FROM attachments WHERE incident_id = ?1 ORDER BY id ASC",
        )
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt
        .query_map(params![incident_id], |row| {
            Ok(Attachment {
                id: row.get(0)?,
                incident_id: row.get(1)?,
                file_url: row.get(2)?,
                uploaded_at: row.get(3)?,
            })
        })
        .map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}
