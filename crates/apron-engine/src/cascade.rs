//! Reassignment Cascade: redistribute a departing employee's open incidents,
//! then delete the employee.
//!
//! Target priority for each open incident:
//! 1. the explicit target, if one was supplied, receives every incident;
//! 2. otherwise the next "user"-role employee from the candidate pool
//!    (id ascending, busy or not);
//! 3. once the pool runs dry, the requester.
//!
//! The caller runs [`delete_employee`] inside one transaction. Any error
//! leaves the store untouched.

use apron_core::errors::{IncidentError, IncidentResult};
use apron_core::ids::{EmployeeId, IncidentId};
use apron_core::models::Employee;
use apron_core::Role;
use apron_storage::queries::{employees, incidents};
use rusqlite::Connection;
use serde::Serialize;

/// One incident moved off the departing employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reassignment {
    pub incident_id: IncidentId,
    pub from: EmployeeId,
    pub to: EmployeeId,
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeletionOutcome {
    /// The employee held no open incidents.
    Deleted { employee_id: EmployeeId },
    /// Open incidents were moved before the employee was removed.
    DeletedWithReassignment {
        employee_id: EmployeeId,
        reassignments: Vec<Reassignment>,
    },
}

impl DeletionOutcome {
    pub fn employee_id(&self) -> EmployeeId {
        match self {
            Self::Deleted { employee_id } | Self::DeletedWithReassignment { employee_id, .. } => {
                *employee_id
            }
        }
    }

    pub fn reassignments(&self) -> &[Reassignment] {
        match self {
            Self::Deleted { .. } => &[],
            Self::DeletedWithReassignment { reassignments, .. } => reassignments,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Deleted { employee_id } => format!("employee {employee_id} deleted"),
            Self::DeletedWithReassignment {
                employee_id,
                reassignments,
            } => format!(
                "employee {employee_id} deleted; {} open incident(s) reassigned",
                reassignments.len()
            ),
        }
    }
}

/// Pair each open incident with its new assignee.
///
/// `open` and `pool` must already be in their deterministic order. With an
/// explicit target every incident goes to it; otherwise each incident takes
/// the next pool entry and the rest fall back to `fallback`.
pub fn plan_reassignments(
    departing: EmployeeId,
    open: &[IncidentId],
    pool: &[EmployeeId],
    fallback: EmployeeId,
    explicit: Option<EmployeeId>,
) -> Vec<Reassignment> {
    let mut candidates = pool.iter().copied();
    open.iter()
        .map(|&incident_id| {
            let to = explicit
                .or_else(|| candidates.next())
                .unwrap_or(fallback);
            Reassignment {
                incident_id,
                from: departing,
                to,
            }
        })
        .collect()
}

/// Delete `employee_id`, reassigning its open incidents first.
///
/// Validation happens before any write: the employee must exist, must not be
/// the requester, and an explicit target must exist and differ from the
/// departing employee.
pub fn delete_employee(
    conn: &Connection,
    employee_id: EmployeeId,
    requester: EmployeeId,
    explicit_target: Option<EmployeeId>,
    now: i64,
) -> IncidentResult<DeletionOutcome> {
    let departing = employees::get_employee(conn, employee_id)?
        .ok_or_else(|| IncidentError::not_found("employee", employee_id))?;
    if departing.id == requester {
        return Err(IncidentError::bad_request("an administrator cannot delete their own account"));
    }

    let explicit = match explicit_target {
        Some(target) => Some(resolve_explicit_target(conn, &departing, target)?),
        None => None,
    };

    let open = incidents::open_incidents_for_employee(conn, departing.id)?;
    if open.is_empty() {
        remove(conn, &departing)?;
        tracing::info!(employee_id = %departing.id, "employee deleted");
        return Ok(DeletionOutcome::Deleted {
            employee_id: departing.id,
        });
    }

    let pool: Vec<EmployeeId> = match explicit {
        Some(_) => Vec::new(),
        None => employees::list_employees_by_role(conn, Role::User, Some(departing.id))?
            .into_iter()
            .map(|e| e.id)
            .collect(),
    };
    let open_ids: Vec<IncidentId> = open.iter().map(|incident| incident.id).collect();
    let plan = plan_reassignments(departing.id, &open_ids, &pool, requester, explicit);

    for step in &plan {
        incidents::set_assignee(conn, step.incident_id, Some(step.to), now)?;
        tracing::info!(
            incident_id = %step.incident_id,
            from = %step.from,
            to = %step.to,
            "incident reassigned"
        );
    }
    remove(conn, &departing)?;
    tracing::info!(
        employee_id = %departing.id,
        reassigned = plan.len(),
        "employee deleted with reassignment"
    );

    Ok(DeletionOutcome::DeletedWithReassignment {
        employee_id: departing.id,
        reassignments: plan,
    })
}

fn resolve_explicit_target(
    conn: &Connection,
    departing: &Employee,
    target: EmployeeId,
) -> IncidentResult<EmployeeId> {
    if target == departing.id {
        return Err(IncidentError::bad_request(
            "reassignment target must differ from the employee being deleted",
        ));
    }
    match employees::get_employee(conn, target)? {
        Some(employee) => Ok(employee.id),
        None => {
            tracing::warn!(
                employee_id = %departing.id,
                target = %target,
                "unknown reassignment target"
            );
            Err(IncidentError::bad_request(format!(
                "reassignment target {target} does not exist"
            )))
        }
    }
}

fn remove(conn: &Connection, employee: &Employee) -> IncidentResult<()> {
    if employees::delete_employee(conn, employee.id)? == 0 {
        return Err(IncidentError::not_found("employee", employee.id));
    }
    Ok(())
}
