//! V002: Seed the fixed status table {1 new, 2 in-progress, 3 completed}.

pub const MIGRATION_SQL: &str = r#"
INSERT OR IGNORE INTO incident_statuses (id, name, description) VALUES
    (1, 'new', 'Reported, not yet worked on'),
    (2, 'in-progress', 'At least one response has been recorded'),
    (3, 'completed', 'Closed by the assignee; a completion report exists');
"#;
