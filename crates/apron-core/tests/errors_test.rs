use apron_core::errors::*;

#[test]
fn not_found_carries_entity_and_id() {
    let err = IncidentError::not_found("incident", 12);
    let msg = err.to_string();
    assert!(msg.contains("incident"));
    assert!(msg.contains("12"));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn business_rule_errors_map_to_their_kind() {
    let invalid = IncidentError::InvalidState {
        incident_id: 3,
        status: "completed".into(),
    };
    assert_eq!(invalid.kind(), ErrorKind::InvalidState);
    assert!(invalid.to_string().contains("completed"));

    assert_eq!(IncidentError::forbidden("nope").kind(), ErrorKind::Forbidden);
    assert_eq!(IncidentError::bad_request("bad").kind(), ErrorKind::BadRequest);
}

#[test]
fn collaborator_failures_are_internal() {
    let not_configured = IncidentError::NotConfigured {
        what: "status 'completed'".into(),
    };
    assert_eq!(not_configured.kind(), ErrorKind::InternalError);

    let render: IncidentError = ReportError::Format {
        message: "bad template".into(),
    }
    .into();
    assert_eq!(render.kind(), ErrorKind::InternalError);

    let storage: IncidentError = StorageError::SqliteError {
        message: "disk full".into(),
    }
    .into();
    assert_eq!(storage.kind(), ErrorKind::InternalError);
}

#[test]
fn error_codes_are_tagged() {
    let err = IncidentError::forbidden("not the assignee");
    assert_eq!(err.error_code(), "FORBIDDEN");
    assert!(err.tagged_string().starts_with("[FORBIDDEN] "));

    let storage: IncidentError = StorageError::MigrationFailed {
        version: 2,
        message: "syntax".into(),
    }
    .into();
    assert_eq!(storage.error_code(), "MIGRATION_FAILED");

    let render: IncidentError = ReportError::Io {
        path: "/reports/x.txt".into(),
        message: "denied".into(),
    }
    .into();
    assert_eq!(render.error_code(), "RENDER_ERROR");
}

#[test]
fn rusqlite_errors_convert_to_storage() {
    let err: IncidentError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, IncidentError::Storage(StorageError::SqliteError { .. })));
}
