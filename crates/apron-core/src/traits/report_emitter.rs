use chrono::{DateTime, Utc};

use crate::errors::ReportError;
use crate::models::{EmployeeSnapshot, IncidentSnapshot};

/// Renders the completion artifact for an incident.
///
/// Called before the completing transaction opens. The returned reference is
/// stored verbatim as the incident's conclusion.
pub trait ReportEmitter: Send + Sync {
    fn render(
        &self,
        incident: &IncidentSnapshot,
        employee: &EmployeeSnapshot,
        completed_at: DateTime<Utc>,
    ) -> Result<String, ReportError>;
}
