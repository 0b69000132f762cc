//! V001 initial schema: employees, locations, statuses, incidents and
//! the incident child logs.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    position TEXT,
    email TEXT NOT NULL UNIQUE,
    phone TEXT,
    role TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('admin', 'user')),
    password_hash TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_employees_role ON employees(role);

CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    location_name TEXT NOT NULL,
    location_type TEXT
) STRICT;

-- Seed data only; rows are written by migrations, never by the engine.
CREATE TABLE IF NOT EXISTS incident_statuses (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT
) STRICT;

-- assigned_employee_id is nulled on employee deletion. The removal cascade
-- reassigns every open incident first, so only finished incidents lose it.
CREATE TABLE IF NOT EXISTS incidents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    incident_type TEXT NOT NULL,
    incident_datetime INTEGER NOT NULL,
    location_id INTEGER REFERENCES locations(id) ON DELETE SET NULL,
    assigned_employee_id INTEGER REFERENCES employees(id) ON DELETE SET NULL,
    status_id INTEGER NOT NULL DEFAULT 1 REFERENCES incident_statuses(id),
    conclusion TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_incidents_assignee ON incidents(assigned_employee_id);
CREATE INDEX IF NOT EXISTS idx_incidents_status ON incidents(status_id);
CREATE INDEX IF NOT EXISTS idx_incidents_datetime ON incidents(incident_datetime DESC);

CREATE TABLE IF NOT EXISTS incident_responses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    incident_id INTEGER NOT NULL REFERENCES incidents(id) ON DELETE CASCADE,
    action_taken TEXT NOT NULL,
    performed_by_id INTEGER REFERENCES employees(id) ON DELETE SET NULL,
    response_datetime INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_responses_incident ON incident_responses(incident_id);

CREATE TABLE IF NOT EXISTS incident_sources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    incident_id INTEGER NOT NULL REFERENCES incidents(id) ON DELETE CASCADE,
    source_type TEXT,
    source_description TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_sources_incident ON incident_sources(incident_id);

CREATE TABLE IF NOT EXISTS attachments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    incident_id INTEGER NOT NULL REFERENCES incidents(id) ON DELETE CASCADE,
    file_url TEXT NOT NULL,
    uploaded_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_attachments_incident ON attachments(incident_id);
"#;
