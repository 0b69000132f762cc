//! Idempotent seed data: the bootstrap administrator and default locations.
//! Statuses are seeded by migration, not here.

use apron_core::errors::StorageError;
use apron_core::ids::EmployeeId;
use apron_core::models::{NewEmployee, NewLocation};
use apron_core::Role;
use rusqlite::Connection;

use crate::queries::{employees, locations};

/// Default airport locations as (name, type).
pub const DEFAULT_LOCATIONS: &[(&str, &str)] = &[
    ("Terminal A", "passenger area"),
    ("Cargo Hold", "technical area"),
    ("Control Zone", "security"),
];

/// Insert the administrator unless an employee with `email` exists.
/// Returns the id of the inserted row, or `None` if nothing was written.
pub fn seed_admin(
    conn: &Connection,
    email: &str,
    password_hash: &str,
) -> Result<Option<EmployeeId>, StorageError> {
    if employees::get_employee_by_email(conn, email)?.is_some() {
        return Ok(None);
    }
    let id = employees::insert_employee(
        conn,
        &NewEmployee {
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            position: None,
            email: email.to_string(),
            phone: None,
            role: Role::Admin,
            password_hash: password_hash.to_string(),
        },
    )?;
    tracing::info!(employee_id = %id, email, "seeded administrator");
    Ok(Some(id))
}

/// Insert the default locations if the table is empty.
/// Returns the number of rows written.
pub fn seed_locations(conn: &Connection) -> Result<usize, StorageError> {
    if locations::count_locations(conn)? > 0 {
        return Ok(0);
    }
    for (name, location_type) in DEFAULT_LOCATIONS {
        locations::insert_location(
            conn,
            &NewLocation {
                name: name.to_string(),
                location_type: Some(location_type.to_string()),
            },
        )?;
    }
    tracing::info!(count = DEFAULT_LOCATIONS.len(), "seeded default locations");
    Ok(DEFAULT_LOCATIONS.len())
}
