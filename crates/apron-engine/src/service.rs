//! `IncidentService`: the operations exposed to the routing layer.
//!
//! Each operation authorizes the caller first, then runs its rule functions
//! against one connection or one transaction. Multi-row mutations always run
//! inside a single `BEGIN IMMEDIATE` transaction.

use std::sync::Arc;

use apron_core::config::{ApronConfig, SeedConfig};
use apron_core::errors::{IncidentError, IncidentResult};
use apron_core::ids::{EmployeeId, IncidentId};
use apron_core::models::{
    Attachment, Employee, EmployeePatch, Incident, IncidentDetail, IncidentPatch, IncidentResponse,
    IncidentSource, IncidentStatus, Location, NewAttachment, NewEmployee, NewIncident, NewResponse,
    NewSource,
};
use apron_core::time::{now_millis, to_datetime};
use apron_core::traits::ReportEmitter;
use apron_core::{Caller, Role};
use apron_storage::queries::{
    attachments, employees, incidents, locations, responses, sources, statuses,
};
use apron_storage::{seed, DatabaseManager};
use rusqlite::Connection;
use serde::Serialize;

use crate::assignment::{self, AssignOutcome};
use crate::authz::{authorize, Capability};
use crate::availability::{self, EmployeeAvailability};
use crate::cascade::{self, DeletionOutcome};
use crate::lifecycle;
use crate::report::FileReportEmitter;

/// What the auth collaborator needs to verify a login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub employee_id: EmployeeId,
    pub role: Role,
    pub password_hash: String,
}

/// Rows written by [`IncidentService::seed_defaults`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub admin: Option<EmployeeId>,
    pub locations: usize,
}

pub struct IncidentService {
    db: DatabaseManager,
    emitter: Arc<dyn ReportEmitter>,
}

impl IncidentService {
    pub fn new(db: DatabaseManager, emitter: Arc<dyn ReportEmitter>) -> Self {
        Self { db, emitter }
    }

    /// Open the store and the file-backed report emitter described by `config`.
    pub fn open(config: &ApronConfig) -> IncidentResult<Self> {
        let db = DatabaseManager::from_config(&config.storage)?;
        let emitter = FileReportEmitter::from_config(&config.reports);
        tracing::info!(reports = %emitter.output_dir().display(), "incident service ready");
        Ok(Self::new(db, Arc::new(emitter)))
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    /// Seed the administrator and default locations. Safe to call on every start.
    pub fn seed_defaults(&self, config: &SeedConfig) -> IncidentResult<SeedSummary> {
        self.db.with_transaction(|tx| {
            let admin = match config.admin_password_hash.as_deref() {
                Some(hash) => seed::seed_admin(tx, config.effective_admin_email(), hash)?,
                None => {
                    tracing::debug!("no admin credential configured, skipping admin seed");
                    None
                }
            };
            let locations = if config.effective_seed_locations() {
                seed::seed_locations(tx)?
            } else {
                0
            };
            Ok(SeedSummary { admin, locations })
        })
    }

    // ---- employees ----

    /// Self-registration. The role is always `user`.
    pub fn register_employee(&self, new: NewEmployee) -> IncidentResult<Employee> {
        let new = NewEmployee {
            role: Role::User,
            ..new
        };
        self.db.with_transaction(|tx| insert_employee(tx, &new))
    }

    pub fn credentials_for(&self, email: &str) -> IncidentResult<Option<Credentials>> {
        self.db.with_reader(|conn| {
            Ok(employees::get_employee_by_email(conn, email)?.map(|e| Credentials {
                employee_id: e.id,
                role: e.role,
                password_hash: e.password_hash,
            }))
        })
    }

    pub fn create_employee(&self, caller: &Caller, new: NewEmployee) -> IncidentResult<Employee> {
        authorize(caller, Capability::ADMIN)?;
        self.db.with_transaction(|tx| insert_employee(tx, &new))
    }

    pub fn get_employee(
        &self,
        caller: &Caller,
        employee_id: EmployeeId,
    ) -> IncidentResult<Employee> {
        authorize(caller, Capability::SelfOrAdmin(employee_id))?;
        self.db.with_reader(|conn| {
            employees::get_employee(conn, employee_id)?
                .ok_or_else(|| IncidentError::not_found("employee", employee_id))
        })
    }

    pub fn update_employee(
        &self,
        caller: &Caller,
        employee_id: EmployeeId,
        patch: &EmployeePatch,
    ) -> IncidentResult<Employee> {
        authorize(caller, Capability::ADMIN)?;
        self.db.with_transaction(|tx| {
            let mut employee = employees::get_employee(tx, employee_id)?
                .ok_or_else(|| IncidentError::not_found("employee", employee_id))?;
            if patch.is_empty() {
                return Ok(employee);
            }
            if let Some(ref email) = patch.email {
                if employees::email_taken(tx, email, Some(employee_id))? {
                    return Err(IncidentError::bad_request("email already registered"));
                }
            }
            patch.apply_to(&mut employee);
            employees::update_employee(tx, &employee)?;
            tracing::info!(employee_id = %employee_id, "employee updated");
            Ok(employee)
        })
    }

    pub fn list_employees_with_busy_state(
        &self,
        caller: &Caller,
    ) -> IncidentResult<Vec<EmployeeAvailability>> {
        authorize(caller, Capability::ADMIN)?;
        self.db.with_reader(availability::list_with_busy_state)
    }

    /// Delete an employee, reassigning their open incidents in the same
    /// transaction. Nothing is written if any step fails.
    pub fn delete_employee(
        &self,
        caller: &Caller,
        employee_id: EmployeeId,
        explicit_target: Option<EmployeeId>,
    ) -> IncidentResult<DeletionOutcome> {
        authorize(caller, Capability::ADMIN)?;
        let now = now_millis();
        self.db.with_transaction(|tx| {
            ensure_caller_exists(tx, caller)?;
            cascade::delete_employee(tx, employee_id, caller.employee_id, explicit_target, now)
        })
    }

    // ---- incidents ----

    pub fn create_incident(&self, caller: &Caller, new: &NewIncident) -> IncidentResult<Incident> {
        authorize(caller, Capability::ADMIN)?;
        let now = now_millis();
        self.db.with_transaction(|tx| lifecycle::create(tx, new, now))
    }

    pub fn update_incident(
        &self,
        caller: &Caller,
        incident_id: IncidentId,
        patch: &IncidentPatch,
    ) -> IncidentResult<Incident> {
        authorize(caller, Capability::ADMIN)?;
        let now = now_millis();
        self.db.with_transaction(|tx| lifecycle::update(tx, incident_id, patch, now))
    }

    pub fn delete_incident(&self, caller: &Caller, incident_id: IncidentId) -> IncidentResult<()> {
        authorize(caller, Capability::ADMIN)?;
        self.db.with_transaction(|tx| {
            if incidents::delete_incident(tx, incident_id)? == 0 {
                return Err(IncidentError::not_found("incident", incident_id));
            }
            tracing::info!(incident_id = %incident_id, "incident deleted");
            Ok(())
        })
    }

    pub fn get_incident(
        &self,
        caller: &Caller,
        incident_id: IncidentId,
    ) -> IncidentResult<IncidentDetail> {
        authorize(caller, Capability::Authenticated)?;
        self.db.with_reader(|conn| load_detail(conn, incident_id))
    }

    /// Every incident, most recent occurrence first.
    pub fn list_incidents(&self, caller: &Caller) -> IncidentResult<Vec<Incident>> {
        authorize(caller, Capability::ADMIN)?;
        self.db.with_reader(|conn| Ok(incidents::list_incidents(conn)?))
    }

    /// Incidents assigned to the caller, most recent occurrence first.
    pub fn list_my_incidents(&self, caller: &Caller) -> IncidentResult<Vec<Incident>> {
        authorize(caller, Capability::Authenticated)?;
        self.db.with_reader(|conn| {
            Ok(incidents::list_incidents_for_employee(conn, caller.employee_id)?)
        })
    }

    pub fn assign(
        &self,
        caller: &Caller,
        incident_id: IncidentId,
        employee_id: EmployeeId,
    ) -> IncidentResult<AssignOutcome> {
        authorize(caller, Capability::ADMIN)?;
        let now = now_millis();
        self.db
            .with_transaction(|tx| assignment::assign(tx, incident_id, employee_id, now))
    }

    /// Complete an incident as its assignee. The assignee check runs
    /// against the stored incident before anything is rendered.
    ///
    /// The report is rendered before the write transaction opens. A render
    /// failure leaves the incident untouched. A crash after rendering may
    /// leave an orphaned report file but never a half-completed incident.
    pub fn complete(&self, caller: &Caller, incident_id: IncidentId) -> IncidentResult<Incident> {
        let plan = self
            .db
            .with_reader(|conn| lifecycle::prepare_completion(conn, incident_id, caller))?;

        let now = now_millis();
        let reference = self
            .emitter
            .render(&plan.incident, &plan.employee, to_datetime(now))
            .map_err(|e| {
                tracing::error!(incident_id = %incident_id, error = %e, "completion report failed");
                IncidentError::Render(e)
            })?;

        self.db
            .with_transaction(|tx| lifecycle::commit_completion(tx, &plan, &reference, now))
    }

    /// Append a response. The first response moves a `new` incident to
    /// `in-progress`.
    pub fn record_response(
        &self,
        caller: &Caller,
        incident_id: IncidentId,
        response: &NewResponse,
    ) -> IncidentResult<IncidentResponse> {
        let now = now_millis();
        self.db.with_transaction(|tx| {
            let (incident, status) = lifecycle::load_with_status(tx, incident_id)?;
            authorize(caller, Capability::AssigneeOrAdmin(incident.assigned_employee_id))?;
            lifecycle::ensure_open(&incident, &status)?;
            if response.action_taken.trim().is_empty() {
                return Err(IncidentError::bad_request("action_taken is required"));
            }

            let performed_by = Some(caller.employee_id);
            let id = responses::insert_response(tx, incident_id, response, performed_by, now)?;
            lifecycle::mark_in_progress(tx, &incident, &status, now)?;
            tracing::info!(incident_id = %incident_id, response_id = %id, "response recorded");
            Ok(IncidentResponse {
                id,
                incident_id,
                action_taken: response.action_taken.clone(),
                performed_by_id: performed_by,
                response_datetime: now,
            })
        })
    }

    pub fn add_source(
        &self,
        caller: &Caller,
        incident_id: IncidentId,
        source: &NewSource,
    ) -> IncidentResult<IncidentSource> {
        authorize(caller, Capability::Authenticated)?;
        self.db.with_transaction(|tx| {
            let (incident, status) = lifecycle::load_with_status(tx, incident_id)?;
            lifecycle::ensure_open(&incident, &status)?;
            let id = sources::insert_source(tx, incident_id, source)?;
            tracing::info!(incident_id = %incident_id, source_id = %id, "source added");
            Ok(IncidentSource {
                id,
                incident_id,
                source_type: source.source_type.clone(),
                source_description: source.source_description.clone(),
            })
        })
    }

    pub fn add_attachment(
        &self,
        caller: &Caller,
        incident_id: IncidentId,
        attachment: &NewAttachment,
    ) -> IncidentResult<Attachment> {
        authorize(caller, Capability::Authenticated)?;
        if attachment.file_url.trim().is_empty() {
            return Err(IncidentError::bad_request("file_url is required"));
        }
        let now = now_millis();
        self.db.with_transaction(|tx| {
            let (incident, status) = lifecycle::load_with_status(tx, incident_id)?;
            lifecycle::ensure_open(&incident, &status)?;
            let id = attachments::insert_attachment(tx, incident_id, attachment, now)?;
            tracing::info!(incident_id = %incident_id, attachment_id = %id, "attachment added");
            Ok(Attachment {
                id,
                incident_id,
                file_url: attachment.file_url.clone(),
                uploaded_at: now,
            })
        })
    }

    // ---- reference data ----

    pub fn list_locations(&self, caller: &Caller) -> IncidentResult<Vec<Location>> {
        authorize(caller, Capability::Authenticated)?;
        self.db.with_reader(|conn| Ok(locations::list_locations(conn)?))
    }

    pub fn list_statuses(&self, caller: &Caller) -> IncidentResult<Vec<IncidentStatus>> {
        authorize(caller, Capability::Authenticated)?;
        self.db.with_reader(|conn| Ok(statuses::list_statuses(conn)?))
    }
}

fn insert_employee(conn: &Connection, new: &NewEmployee) -> IncidentResult<Employee> {
    if new.first_name.trim().is_empty() || new.last_name.trim().is_empty() {
        return Err(IncidentError::bad_request("first and last name are required"));
    }
    if !new.email.contains('@') {
        return Err(IncidentError::bad_request("a valid email is required"));
    }
    if employees::email_taken(conn, &new.email, None)? {
        return Err(IncidentError::bad_request("email already registered"));
    }
    let id = employees::insert_employee(conn, new)?;
    tracing::info!(employee_id = %id, role = %new.role, "employee created");
    employees::get_employee(conn, id)?.ok_or_else(|| IncidentError::not_found("employee", id))
}

/// The requester becomes the fallback assignee, so it must be a real row.
fn ensure_caller_exists(conn: &Connection, caller: &Caller) -> IncidentResult<()> {
    if employees::get_employee(conn, caller.employee_id)?.is_none() {
        tracing::warn!(employee_id = %caller.employee_id, "caller not present in store");
        return Err(IncidentError::forbidden("caller is not a known employee"));
    }
    Ok(())
}

fn load_detail(conn: &Connection, incident_id: IncidentId) -> IncidentResult<IncidentDetail> {
    let (incident, status) = lifecycle::load_with_status(conn, incident_id)?;
    let location = match incident.location_id {
        Some(id) => locations::get_location(conn, id)?,
        None => None,
    };
    let assigned_employee = match incident.assigned_employee_id {
        Some(id) => employees::get_employee(conn, id)?.map(|e| e.to_ref()),
        None => None,
    };
    Ok(IncidentDetail {
        responses: responses::list_responses(conn, incident_id)?,
        sources: sources::list_sources(conn, incident_id)?,
        attachments: attachments::list_attachments(conn, incident_id)?,
        incident,
        status,
        location,
        assigned_employee,
    })
}
