//! Availability Resolver: an employee is busy while they hold at least one
//! open incident. Always computed from the store, never cached.

use apron_core::errors::IncidentResult;
use apron_core::ids::{EmployeeId, IncidentId};
use apron_core::models::Employee;
use apron_storage::queries::{employees, incidents};
use rusqlite::Connection;
use serde::Serialize;

/// The open incident that makes an employee busy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusyIncident {
    pub id: IncidentId,
    pub title: String,
    pub status: String,
}

/// An employee decorated with their current busy state.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeAvailability {
    pub employee: Employee,
    pub name: String,
    pub is_busy: bool,
    /// Lowest-id open incident, when busy.
    pub assigned_incident: Option<BusyIncident>,
}

pub fn is_busy(conn: &Connection, employee_id: EmployeeId) -> IncidentResult<bool> {
    Ok(incidents::count_open_incidents_for_employee(conn, employee_id)? > 0)
}

pub fn availability_of(
    conn: &Connection,
    employee: Employee,
) -> IncidentResult<EmployeeAvailability> {
    let open = incidents::first_open_incident_for_employee(conn, employee.id)?;
    Ok(EmployeeAvailability {
        name: employee.full_name(),
        is_busy: open.is_some(),
        assigned_incident: open.map(|(incident, status)| BusyIncident {
            id: incident.id,
            title: incident.title,
            status,
        }),
        employee,
    })
}

/// Every employee, id ascending, with busy state.
pub fn list_with_busy_state(conn: &Connection) -> IncidentResult<Vec<EmployeeAvailability>> {
    let all = employees::list_employees(conn)?;
    tracing::debug!(count = all.len(), "resolving availability");
    all.into_iter()
        .map(|employee| availability_of(conn, employee))
        .collect()
}
