//! Lifecycle State Machine: new → in-progress → completed.
//!
//! `new` is the only initial status. The first recorded response moves a
//! `new` incident to `in-progress`. Only the assignee can complete, and a
//! completed incident accepts no further edits, assignments, or child records.

use apron_core::constants::{STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_NEW, STATUS_NEW_ID};
use apron_core::errors::{IncidentError, IncidentResult};
use apron_core::ids::{EmployeeId, IncidentId};
use apron_core::models::{
    EmployeeSnapshot, Incident, IncidentPatch, IncidentSnapshot, IncidentStatus, NewIncident,
};
use apron_core::Caller;
use apron_storage::queries::{employees, incidents, locations, statuses};
use rusqlite::Connection;

use crate::authz::{authorize, Capability};

/// Load an incident and its resolved status.
pub fn load_with_status(
    conn: &Connection,
    incident_id: IncidentId,
) -> IncidentResult<(Incident, IncidentStatus)> {
    let incident = incidents::get_incident(conn, incident_id)?
        .ok_or_else(|| IncidentError::not_found("incident", incident_id))?;
    let status = statuses::get_status(conn, incident.status_id)?.ok_or_else(|| {
        IncidentError::NotConfigured {
            what: format!("status {} referenced by incident {incident_id}", incident.status_id),
        }
    })?;
    Ok((incident, status))
}

/// `InvalidState` when `status` is terminal.
pub fn ensure_open(incident: &Incident, status: &IncidentStatus) -> IncidentResult<()> {
    if status.is_terminal() {
        return Err(IncidentError::InvalidState {
            incident_id: incident.id.get(),
            status: status.name.clone(),
        });
    }
    Ok(())
}

/// Create an incident. The status is always `new`, whatever the caller sent.
pub fn create(conn: &Connection, new: &NewIncident, now: i64) -> IncidentResult<Incident> {
    if new.title.trim().is_empty() {
        return Err(IncidentError::bad_request("title is required"));
    }
    if new.incident_type.trim().is_empty() {
        return Err(IncidentError::bad_request("incident_type is required"));
    }
    if let Some(location_id) = new.location_id {
        if locations::get_location(conn, location_id)?.is_none() {
            return Err(IncidentError::bad_request(format!("unknown location {location_id}")));
        }
    }
    if let Some(employee_id) = new.assigned_employee_id {
        if employees::get_employee(conn, employee_id)?.is_none() {
            return Err(IncidentError::bad_request(format!("unknown employee {employee_id}")));
        }
    }
    if let Some(requested) = new.status_id.filter(|s| *s != STATUS_NEW_ID) {
        tracing::debug!(requested = %requested, "ignoring caller-supplied status on create");
    }

    let id = incidents::insert_incident(conn, new, STATUS_NEW_ID, now)?;
    let incident = incidents::get_incident(conn, id)?
        .ok_or_else(|| IncidentError::not_found("incident", id))?;
    tracing::info!(incident_id = %id, title = %incident.title, "incident created");
    Ok(incident)
}

/// Edit the descriptive fields of an open incident.
/// A terminal incident fails with `Forbidden`.
pub fn update(
    conn: &Connection,
    incident_id: IncidentId,
    patch: &IncidentPatch,
    now: i64,
) -> IncidentResult<Incident> {
    let (mut incident, status) = load_with_status(conn, incident_id)?;
    if status.is_terminal() {
        tracing::warn!(incident_id = %incident_id, "edit of finished incident rejected");
        return Err(IncidentError::forbidden(format!(
            "incident {incident_id} is '{}' and can no longer be edited",
            status.name
        )));
    }
    if patch.is_empty() {
        return Ok(incident);
    }
    if let Some(location_id) = patch.location_id {
        if locations::get_location(conn, location_id)?.is_none() {
            return Err(IncidentError::bad_request(format!("unknown location {location_id}")));
        }
    }
    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(IncidentError::bad_request("title must not be empty"));
    }
    if patch.incident_type.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(IncidentError::bad_request("incident_type must not be empty"));
    }

    patch.apply_to(&mut incident);
    incidents::update_incident_fields(conn, &incident, now)?;
    incident.updated_at = now;
    tracing::info!(incident_id = %incident_id, "incident updated");
    Ok(incident)
}

/// Move a `new` incident to `in-progress`. Returns whether the status changed.
pub fn mark_in_progress(
    conn: &Connection,
    incident: &Incident,
    status: &IncidentStatus,
    now: i64,
) -> IncidentResult<bool> {
    if !status.name.eq_ignore_ascii_case(STATUS_NEW) {
        return Ok(false);
    }
    let in_progress = statuses::find_status_by_name(conn, STATUS_IN_PROGRESS)?.ok_or_else(|| {
        IncidentError::NotConfigured {
            what: format!("status '{STATUS_IN_PROGRESS}'"),
        }
    })?;
    incidents::set_status(conn, incident.id, in_progress.id, now)?;
    tracing::info!(incident_id = %incident.id, "incident in progress");
    Ok(true)
}

/// Everything validated before a completion report is rendered.
#[derive(Debug, Clone)]
pub struct CompletionPlan {
    pub incident_id: IncidentId,
    pub acting_employee_id: EmployeeId,
    pub terminal: IncidentStatus,
    pub incident: IncidentSnapshot,
    pub employee: EmployeeSnapshot,
}

/// Validate a completion without writing anything.
///
/// `Forbidden` unless `caller` is the assignee, `InvalidState` if the incident
/// is already finished, `NotConfigured` if the terminal status row is missing.
pub fn prepare_completion(
    conn: &Connection,
    incident_id: IncidentId,
    caller: &Caller,
) -> IncidentResult<CompletionPlan> {
    let (incident, status) = load_with_status(conn, incident_id)?;
    authorize(caller, Capability::Assignee(incident.assigned_employee_id))?;
    ensure_open(&incident, &status)?;
    let acting = caller.employee_id;

    let terminal = statuses::find_status_by_name(conn, STATUS_COMPLETED)?.ok_or_else(|| {
        tracing::error!(incident_id = %incident_id, "terminal status missing from store");
        IncidentError::NotConfigured {
            what: format!("status '{STATUS_COMPLETED}'"),
        }
    })?;
    let employee = employees::get_employee(conn, acting)?
        .ok_or_else(|| IncidentError::not_found("employee", acting))?;
    let location = match incident.location_id {
        Some(id) => locations::get_location(conn, id)?,
        None => None,
    };

    Ok(CompletionPlan {
        incident_id,
        acting_employee_id: acting,
        terminal,
        incident: IncidentSnapshot::capture(&incident, &status.name, location.as_ref()),
        employee: EmployeeSnapshot::from(&employee),
    })
}

/// Persist a completion whose report has already been rendered.
///
/// Re-checks ownership and status inside the caller's transaction, since
/// either may have changed while the report was rendering.
pub fn commit_completion(
    conn: &Connection,
    plan: &CompletionPlan,
    conclusion: &str,
    now: i64,
) -> IncidentResult<Incident> {
    let (mut incident, status) = load_with_status(conn, plan.incident_id)?;
    if incident.assigned_employee_id != Some(plan.acting_employee_id) {
        tracing::warn!(
            incident_id = %plan.incident_id,
            employee_id = %plan.acting_employee_id,
            "incident reassigned while its report was rendering"
        );
        return Err(IncidentError::forbidden(
            "incident was reassigned before completion could be recorded",
        ));
    }
    ensure_open(&incident, &status)?;

    incidents::set_status_with_conclusion(
        conn,
        plan.incident_id,
        plan.terminal.id,
        conclusion,
        now,
    )?;
    incident.status_id = plan.terminal.id;
    incident.conclusion = Some(conclusion.to_string());
    incident.updated_at = now;
    tracing::info!(
        incident_id = %plan.incident_id,
        employee_id = %plan.acting_employee_id,
        conclusion,
        "incident completed"
    );
    Ok(incident)
}
