//! Assignment Engine: point an incident at an employee.

use apron_core::errors::{IncidentError, IncidentResult};
use apron_core::ids::{EmployeeId, IncidentId};
use apron_core::models::Incident;
use apron_storage::queries::{employees, incidents};
use rusqlite::Connection;
use serde::Serialize;

use crate::availability;
use crate::lifecycle;

/// Result of a successful `assign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignOutcome {
    /// The assignee changed.
    Assigned {
        incident: Incident,
        /// The target already held another open incident. Advisory only.
        target_was_busy: bool,
    },
    /// The incident was already assigned to this employee; nothing changed.
    AlreadyAssigned { incident: Incident },
}

impl AssignOutcome {
    pub fn incident(&self) -> &Incident {
        match self {
            Self::Assigned { incident, .. } | Self::AlreadyAssigned { incident } => incident,
        }
    }

    pub fn changed(&self) -> bool {
        matches!(self, Self::Assigned { .. })
    }
}

/// Assign `incident_id` to `employee_id`.
///
/// Terminal incidents are rejected before the no-op check, so a finished
/// incident fails with `InvalidState` even for its current assignee.
/// Busy targets are accepted.
pub fn assign(
    conn: &Connection,
    incident_id: IncidentId,
    employee_id: EmployeeId,
    now: i64,
) -> IncidentResult<AssignOutcome> {
    let (mut incident, status) = lifecycle::load_with_status(conn, incident_id)?;
    let employee = employees::get_employee(conn, employee_id)?
        .ok_or_else(|| IncidentError::not_found("employee", employee_id))?;

    if status.is_terminal() {
        tracing::warn!(
            incident_id = %incident_id,
            status = %status.name,
            "assignment to finished incident rejected"
        );
        return Err(IncidentError::InvalidState {
            incident_id: incident_id.get(),
            status: status.name,
        });
    }

    if incident.assigned_employee_id == Some(employee.id) {
        tracing::debug!(incident_id = %incident_id, employee_id = %employee.id, "already assigned");
        return Ok(AssignOutcome::AlreadyAssigned { incident });
    }

    let target_was_busy = availability::is_busy(conn, employee.id)?;
    if target_was_busy {
        tracing::warn!(
            incident_id = %incident_id,
            employee_id = %employee.id,
            "assigning to an employee who already holds an open incident"
        );
    }

    incidents::set_assignee(conn, incident_id, Some(employee.id), now)?;
    incident.assigned_employee_id = Some(employee.id);
    incident.updated_at = now;

    tracing::info!(
        incident_id = %incident_id,
        employee_id = %employee.id,
        employee = %employee.full_name(),
        "incident assigned"
    );
    Ok(AssignOutcome::Assigned {
        incident,
        target_was_busy,
    })
}
