//! Point-in-time copies handed to the report emitter.

use serde::{Deserialize, Serialize};

use super::{Employee, Incident, Location};
use crate::identity::Role;
use crate::ids::{EmployeeId, IncidentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentSnapshot {
    pub id: IncidentId,
    pub title: String,
    pub description: Option<String>,
    pub incident_type: String,
    pub incident_datetime: i64,
    pub location_name: Option<String>,
    pub status: String,
    pub created_at: i64,
}

impl IncidentSnapshot {
    pub fn capture(incident: &Incident, status: &str, location: Option<&Location>) -> Self {
        Self {
            id: incident.id,
            title: incident.title.clone(),
            description: incident.description.clone(),
            incident_type: incident.incident_type.clone(),
            incident_datetime: incident.incident_datetime,
            location_name: location.map(|l| l.name.clone()),
            status: status.to_string(),
            created_at: incident.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    pub id: EmployeeId,
    pub full_name: String,
    pub email: String,
    pub position: Option<String>,
    pub role: Role,
}

impl From<&Employee> for EmployeeSnapshot {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            full_name: employee.full_name(),
            email: employee.email.clone(),
            position: employee.position.clone(),
            role: employee.role,
        }
    }
}
