//! File-backed completion report.
//!
//! Writes one plain-text report per completed incident into the configured
//! directory and returns the file path as the conclusion reference.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use apron_core::config::ReportConfig;
use apron_core::errors::ReportError;
use apron_core::models::{EmployeeSnapshot, IncidentSnapshot};
use apron_core::time::format_millis;
use apron_core::traits::ReportEmitter;
use chrono::{DateTime, Utc};

pub struct FileReportEmitter {
    output_dir: PathBuf,
}

impl FileReportEmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.effective_output_dir())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `incident-<id>-<yyyymmddThhmmss>.txt`
    pub fn file_name(incident: &IncidentSnapshot, completed_at: DateTime<Utc>) -> String {
        format!(
            "incident-{}-{}.txt",
            incident.id,
            completed_at.format("%Y%m%dT%H%M%S")
        )
    }
}

impl ReportEmitter for FileReportEmitter {
    fn render(
        &self,
        incident: &IncidentSnapshot,
        employee: &EmployeeSnapshot,
        completed_at: DateTime<Utc>,
    ) -> Result<String, ReportError> {
        let body = render_text(incident, employee, completed_at)?;

        std::fs::create_dir_all(&self.output_dir).map_err(|e| ReportError::Io {
            path: self.output_dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = self.output_dir.join(Self::file_name(incident, completed_at));
        std::fs::write(&path, body).map_err(|e| ReportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            incident_id = %incident.id,
            path = %path.display(),
            "completion report written"
        );
        Ok(path.display().to_string())
    }
}

/// Render the report body.
pub fn render_text(
    incident: &IncidentSnapshot,
    employee: &EmployeeSnapshot,
    completed_at: DateTime<Utc>,
) -> Result<String, ReportError> {
    let mut out = String::new();
    write_report(&mut out, incident, employee, completed_at).map_err(|e| ReportError::Format {
        message: e.to_string(),
    })?;
    Ok(out)
}

fn write_report(
    out: &mut String,
    incident: &IncidentSnapshot,
    employee: &EmployeeSnapshot,
    completed_at: DateTime<Utc>,
) -> std::fmt::Result {
    writeln!(out, "INCIDENT COMPLETION REPORT #{}", incident.id)?;
    writeln!(out)?;
    writeln!(out, "Title:        {}", incident.title)?;
    writeln!(out, "Type:         {}", incident.incident_type)?;
    writeln!(
        out,
        "Location:     {}",
        incident.location_name.as_deref().unwrap_or("unspecified")
    )?;
    writeln!(out, "Occurred:     {}", format_millis(incident.incident_datetime))?;
    writeln!(out, "Reported:     {}", format_millis(incident.created_at))?;
    writeln!(out, "Prior status: {}", incident.status)?;
    writeln!(out)?;
    writeln!(out, "Description:")?;
    writeln!(out, "{}", incident.description.as_deref().unwrap_or("-"))?;
    writeln!(out)?;
    match employee.position.as_deref() {
        Some(position) => writeln!(out, "Completed by: {} ({position})", employee.full_name)?,
        None => writeln!(out, "Completed by: {}", employee.full_name)?,
    }
    writeln!(out, "Contact:      {}", employee.email)?;
    writeln!(out, "Completed at: {}", completed_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_core::ids::{EmployeeId, IncidentId};
    use apron_core::Role;
    use chrono::TimeZone;

    fn snapshots() -> (IncidentSnapshot, EmployeeSnapshot) {
        (
            IncidentSnapshot {
                id: IncidentId(12),
                title: "Unattended bag".to_string(),
                description: None,
                incident_type: "security".to_string(),
                incident_datetime: 0,
                location_name: Some("Terminal A".to_string()),
                status: "in-progress".to_string(),
                created_at: 0,
            },
            EmployeeSnapshot {
                id: EmployeeId(9),
                full_name: "Dana Ruiz".to_string(),
                email: "dana@airport.com".to_string(),
                position: Some("Officer".to_string()),
                role: Role::User,
            },
        )
    }

    #[test]
    fn file_name_embeds_id_and_timestamp() {
        let (incident, _) = snapshots();
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(
            FileReportEmitter::file_name(&incident, at),
            "incident-12-20240305T140709.txt"
        );
    }

    #[test]
    fn text_mentions_incident_and_employee() {
        let (incident, employee) = snapshots();
        let text = render_text(&incident, &employee, Utc::now()).unwrap();
        assert!(text.starts_with("INCIDENT COMPLETION REPORT #12"));
        assert!(text.contains("Terminal A"));
        assert!(text.contains("Dana Ruiz (Officer)"));
    }
}
