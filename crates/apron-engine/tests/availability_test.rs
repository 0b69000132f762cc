//! Availability Resolver tests: busy state follows assignment and status.

use apron_core::constants::{STATUS_COMPLETED_ID, STATUS_IN_PROGRESS_ID, STATUS_NEW_ID};
use apron_core::ids::{EmployeeId, IncidentId};
use apron_core::models::{NewEmployee, NewIncident};
use apron_core::Role;
use apron_engine::availability::{is_busy, list_with_busy_state};
use apron_storage::connection::pragmas::apply_pragmas;
use apron_storage::migrations::run_migrations;
use apron_storage::queries::{employees, incidents};
use rusqlite::Connection;

fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    apply_pragmas(&conn).unwrap();
    run_migrations(&conn).unwrap();
    conn
}

fn add_employee(conn: &Connection, email: &str, role: Role) -> EmployeeId {
    employees::insert_employee(
        conn,
        &NewEmployee {
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            position: None,
            email: email.into(),
            phone: None,
            role,
            password_hash: "hash".into(),
        },
    )
    .unwrap()
}

fn add_incident(conn: &Connection, title: &str, assignee: EmployeeId) -> IncidentId {
    incidents::insert_incident(
        conn,
        &NewIncident {
            title: title.into(),
            description: None,
            incident_type: "security".into(),
            incident_datetime: None,
            location_id: None,
            assigned_employee_id: Some(assignee),
            status_id: None,
        },
        STATUS_NEW_ID,
        1_000,
    )
    .unwrap()
}

#[test]
fn busy_tracks_status_changes() {
    let conn = setup_db();
    let e = add_employee(&conn, "e@airport.com", Role::User);
    assert!(!is_busy(&conn, e).unwrap());

    let i = add_incident(&conn, "Laser pointer", e);
    assert!(is_busy(&conn, e).unwrap());

    incidents::set_status(&conn, i, STATUS_IN_PROGRESS_ID, 2_000).unwrap();
    assert!(is_busy(&conn, e).unwrap());

    incidents::set_status(&conn, i, STATUS_COMPLETED_ID, 3_000).unwrap();
    assert!(!is_busy(&conn, e).unwrap());
}

#[test]
fn busy_tracks_reassignment() {
    let conn = setup_db();
    let a = add_employee(&conn, "a@airport.com", Role::User);
    let b = add_employee(&conn, "b@airport.com", Role::User);
    let i = add_incident(&conn, "Bird strike", a);

    incidents::set_assignee(&conn, i, Some(b), 2_000).unwrap();
    assert!(!is_busy(&conn, a).unwrap());
    assert!(is_busy(&conn, b).unwrap());
}

#[test]
fn listing_reports_lowest_open_incident() {
    let conn = setup_db();
    let admin = add_employee(&conn, "admin@airport.com", Role::Admin);
    let e = add_employee(&conn, "e@airport.com", Role::User);
    let first = add_incident(&conn, "First", e);
    add_incident(&conn, "Second", e);
    incidents::set_status(&conn, first, STATUS_COMPLETED_ID, 2_000).unwrap();

    let listing = list_with_busy_state(&conn).unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].employee.id, admin);
    assert!(!listing[0].is_busy);
    assert!(listing[0].assigned_incident.is_none());

    let busy = &listing[1];
    assert_eq!(busy.name, "Ana Lima");
    assert!(busy.is_busy);
    let open = busy.assigned_incident.as_ref().unwrap();
    assert_eq!(open.title, "Second");
    assert_eq!(open.status, "new");
}

#[test]
fn listing_never_exposes_password_hash() {
    let conn = setup_db();
    add_employee(&conn, "e@airport.com", Role::User);
    let json = serde_json::to_string(&list_with_busy_state(&conn).unwrap()).unwrap();
    assert!(!json.contains("password_hash"));
    assert!(json.contains("\"is_busy\":false"));
}
