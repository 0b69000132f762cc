use serde::{Deserialize, Serialize};

use super::{Attachment, EmployeeRef, IncidentResponse, IncidentSource, IncidentStatus, Location};
use crate::ids::{EmployeeId, IncidentId, LocationId, StatusId};

/// A reported incident. Timestamps are unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    pub title: String,
    pub description: Option<String>,
    pub incident_type: String,
    pub incident_datetime: i64,
    pub location_id: Option<LocationId>,
    pub assigned_employee_id: Option<EmployeeId>,
    pub status_id: StatusId,
    /// Reference to the completion report, set when the incident completes.
    pub conclusion: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields accepted when creating an incident.
///
/// `status_id` is accepted for wire compatibility but ignored: every new
/// incident starts in the `new` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncident {
    pub title: String,
    pub description: Option<String>,
    pub incident_type: String,
    /// Occurrence time. Defaults to the creation time.
    pub incident_datetime: Option<i64>,
    pub location_id: Option<LocationId>,
    pub assigned_employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub status_id: Option<StatusId>,
}

/// Partial edit of an open incident. Status and assignee are changed only
/// through the lifecycle and assignment operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub incident_type: Option<String>,
    pub incident_datetime: Option<i64>,
    pub location_id: Option<LocationId>,
}

impl IncidentPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.incident_type.is_none()
            && self.incident_datetime.is_none()
            && self.location_id.is_none()
    }

    pub fn apply_to(&self, incident: &mut Incident) {
        if let Some(ref v) = self.title {
            incident.title = v.clone();
        }
        if let Some(ref v) = self.description {
            incident.description = Some(v.clone());
        }
        if let Some(ref v) = self.incident_type {
            incident.incident_type = v.clone();
        }
        if let Some(v) = self.incident_datetime {
            incident.incident_datetime = v;
        }
        if let Some(v) = self.location_id {
            incident.location_id = Some(v);
        }
    }
}

/// An incident with its references resolved and child records loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentDetail {
    pub incident: Incident,
    pub status: IncidentStatus,
    pub location: Option<Location>,
    pub assigned_employee: Option<EmployeeRef>,
    pub responses: Vec<IncidentResponse>,
    pub sources: Vec<IncidentSource>,
    pub attachments: Vec<Attachment>,
}
