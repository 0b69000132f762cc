//! Append-only child records of an incident.

use serde::{Deserialize, Serialize};

use crate::ids::{AttachmentId, EmployeeId, IncidentId, ResponseId, SourceId};

/// An action taken on an incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentResponse {
    pub id: ResponseId,
    pub incident_id: IncidentId,
    pub action_taken: String,
    /// Cleared when the performing employee is deleted.
    pub performed_by_id: Option<EmployeeId>,
    pub response_datetime: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResponse {
    pub action_taken: String,
}

/// Where the report of an incident came from (a person, a system, a camera).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentSource {
    pub id: SourceId,
    pub incident_id: IncidentId,
    pub source_type: Option<String>,
    pub source_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSource {
    pub source_type: Option<String>,
    pub source_description: Option<String>,
}

/// A file reference attached to an incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub incident_id: IncidentId,
    pub file_url: String,
    pub uploaded_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttachment {
    pub file_url: String,
}
