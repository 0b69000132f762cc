//! Entity store query tests: employees, incidents, children, seed data.

use apron_core::constants::{STATUS_COMPLETED_ID, STATUS_IN_PROGRESS_ID, STATUS_NEW_ID};
use apron_core::ids::{EmployeeId, IncidentId, LocationId};
use apron_core::models::*;
use apron_core::Role;
use apron_storage::connection::pragmas::apply_pragmas;
use apron_storage::migrations::run_migrations;
use apron_storage::queries::{attachments, employees, incidents, locations, responses, sources};
use apron_storage::seed;
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
            first_name: "First".into(),
            last_name: email.into(),
            position: None,
            email: email.into(),
            phone: None,
            role,
            password_hash: "hash".into(),
        },
    )
    .unwrap()
}

fn add_incident(conn: &Connection, title: &str, at: i64, assignee: Option<EmployeeId>) -> IncidentId {
    incidents::insert_incident(
        conn,
        &NewIncident {
            title: title.into(),
            description: None,
            incident_type: "security".into(),
            incident_datetime: Some(at),
            location_id: None,
            assigned_employee_id: assignee,
            status_id: None,
        },
        STATUS_NEW_ID,
        1_000,
    )
    .unwrap()
}

#[test]
fn employee_email_is_unique() {
    let conn = setup_db();
    add_employee(&conn, "a@airport.com", Role::User);
    let dup = employees::insert_employee(
        &conn,
        &NewEmployee {
            first_name: "B".into(),
            last_name: "B".into(),
            position: None,
            email: "a@airport.com".into(),
            phone: None,
            role: Role::User,
            password_hash: "x".into(),
        },
    );
    assert!(dup.is_err());
    assert!(employees::email_taken(&conn, "A@AIRPORT.COM", None).unwrap());
}

#[test]
fn email_taken_ignores_the_owner() {
    let conn = setup_db();
    let id = add_employee(&conn, "a@airport.com", Role::User);
    assert!(!employees::email_taken(&conn, "a@airport.com", Some(id)).unwrap());
}

#[test]
fn role_filter_excludes_and_orders_by_id() {
    let conn = setup_db();
    let u1 = add_employee(&conn, "u1@airport.com", Role::User);
    let _admin = add_employee(&conn, "admin@airport.com", Role::Admin);
    let u2 = add_employee(&conn, "u2@airport.com", Role::User);
    let u3 = add_employee(&conn, "u3@airport.com", Role::User);

    let users = employees::list_employees_by_role(&conn, Role::User, Some(u2)).unwrap();
    let ids: Vec<_> = users.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![u1, u3]);

    let all_users = employees::list_employees_by_role(&conn, Role::User, None).unwrap();
    assert_eq!(all_users.len(), 3);
}

#[test]
fn employee_update_roundtrip() {
    let conn = setup_db();
    let id = add_employee(&conn, "a@airport.com", Role::User);
    let mut e = employees::get_employee(&conn, id).unwrap().unwrap();
    e.role = Role::Admin;
    e.phone = Some("555".into());
    assert_eq!(employees::update_employee(&conn, &e).unwrap(), 1);
    let reloaded = employees::get_employee(&conn, id).unwrap().unwrap();
    assert_eq!(reloaded.role, Role::Admin);
    assert_eq!(reloaded.phone.as_deref(), Some("555"));
}

#[test]
fn incidents_list_newest_occurrence_first() {
    let conn = setup_db();
    let old = add_incident(&conn, "old", 100, None);
    let new = add_incident(&conn, "new", 300, None);
    let mid = add_incident(&conn, "mid", 200, None);
    let ids: Vec<_> = incidents::list_incidents(&conn)
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![new, mid, old]);
}

#[test]
fn open_incident_queries_exclude_terminal_status() {
    let conn = setup_db();
    let e = add_employee(&conn, "e@airport.com", Role::User);
    let a = add_incident(&conn, "a", 100, Some(e));
    let b = add_incident(&conn, "b", 200, Some(e));
    incidents::set_status(&conn, a, STATUS_COMPLETED_ID, 2_000).unwrap();
    incidents::set_status(&conn, b, STATUS_IN_PROGRESS_ID, 2_000).unwrap();

    let open = incidents::open_incidents_for_employee(&conn, e).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, b);
    assert_eq!(incidents::count_open_incidents_for_employee(&conn, e).unwrap(), 1);

    let (first, status) = incidents::first_open_incident_for_employee(&conn, e)
        .unwrap()
        .unwrap();
    assert_eq!(first.id, b);
    assert_eq!(status, "in-progress");

    assert_eq!(incidents::list_incidents_for_employee(&conn, e).unwrap().len(), 2);
}

#[test]
fn closed_alias_counts_as_terminal() {
    let conn = setup_db();
    conn.execute(
        "INSERT INTO incident_statuses (id, name) VALUES (4, 'Closed')",
        [],
    )
    .unwrap();
    let e = add_employee(&conn, "e@airport.com", Role::User);
    let a = add_incident(&conn, "a", 100, Some(e));
    incidents::set_status(&conn, a, apron_core::StatusId(4), 2_000).unwrap();
    assert!(incidents::open_incidents_for_employee(&conn, e).unwrap().is_empty());
}

#[test]
fn deleting_employee_clears_remaining_references() {
    let conn = setup_db();
    let e = add_employee(&conn, "e@airport.com", Role::User);
    let a = add_incident(&conn, "a", 100, Some(e));
    incidents::set_status(&conn, a, STATUS_COMPLETED_ID, 2_000).unwrap();
    responses::insert_response(
        &conn,
        a,
        &NewResponse {
            action_taken: "checked".into(),
        },
        Some(e),
        1_500,
    )
    .unwrap();

    assert_eq!(employees::delete_employee(&conn, e).unwrap(), 1);
    let incident = incidents::get_incident(&conn, a).unwrap().unwrap();
    assert_eq!(incident.assigned_employee_id, None);
    let logged = responses::list_responses(&conn, a).unwrap();
    assert_eq!(logged[0].performed_by_id, None);
}

#[test]
fn deleting_incident_removes_children() {
    let conn = setup_db();
    let a = add_incident(&conn, "a", 100, None);
    sources::insert_source(
        &conn,
        a,
        &NewSource {
            source_type: Some("camera".into()),
            source_description: Some("gate 4".into()),
        },
    )
    .unwrap();
    attachments::insert_attachment(
        &conn,
        a,
        &NewAttachment {
            file_url: "s3://bucket/a.jpg".into(),
        },
        1_200,
    )
    .unwrap();
    assert_eq!(sources::list_sources(&conn, a).unwrap().len(), 1);
    assert_eq!(attachments::list_attachments(&conn, a).unwrap().len(), 1);

    assert_eq!(incidents::delete_incident(&conn, a).unwrap(), 1);
    assert!(sources::list_sources(&conn, a).unwrap().is_empty());
    assert!(attachments::list_attachments(&conn, a).unwrap().is_empty());
}

#[test]
fn missing_occurrence_time_defaults_to_creation() {
    let conn = setup_db();
    let id = incidents::insert_incident(
        &conn,
        &NewIncident {
            title: "t".into(),
            description: None,
            incident_type: "ops".into(),
            incident_datetime: None,
            location_id: Some(LocationId(99)),
            assigned_employee_id: None,
            status_id: None,
        },
        STATUS_NEW_ID,
        5_000,
    );
    // Unknown location violates the foreign key.
    assert!(id.is_err());

    let loc = locations::insert_location(
        &conn,
        &NewLocation {
            name: "Gate 4".into(),
            location_type: None,
        },
    )
    .unwrap();
    let id = incidents::insert_incident(
        &conn,
        &NewIncident {
            title: "t".into(),
            description: None,
            incident_type: "ops".into(),
            incident_datetime: None,
            location_id: Some(loc),
            assigned_employee_id: None,
            status_id: None,
        },
        STATUS_NEW_ID,
        5_000,
    )
    .unwrap();
    let incident = incidents::get_incident(&conn, id).unwrap().unwrap();
    assert_eq!(incident.incident_datetime, 5_000);
    assert_eq!(incident.created_at, 5_000);
    assert_eq!(incident.updated_at, 5_000);
}

#[test]
fn seeding_is_idempotent() {
    let conn = setup_db();
    assert!(seed::seed_admin(&conn, "admin@airport.com", "hash").unwrap().is_some());
    assert!(seed::seed_admin(&conn, "admin@airport.com", "hash").unwrap().is_none());
    assert_eq!(seed::seed_locations(&conn).unwrap(), 3);
    assert_eq!(seed::seed_locations(&conn).unwrap(), 0);
    let names: Vec<_> = locations::list_locations(&conn)
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();
    assert_eq!(names, vec!["Terminal A", "Cargo Hold", "Control Zone"]);
}
