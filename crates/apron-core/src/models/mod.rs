//! Persisted records and the views built from them.

pub mod children;
pub mod employee;
pub mod incident;
pub mod location;
pub mod snapshot;
pub mod status;

pub use children::{Attachment, IncidentResponse, IncidentSource, NewAttachment, NewResponse, NewSource};
pub use employee::{Employee, EmployeePatch, EmployeeRef, NewEmployee};
pub use incident::{Incident, IncidentDetail, IncidentPatch, NewIncident};
pub use location::{Location, NewLocation};
pub use snapshot::{EmployeeSnapshot, IncidentSnapshot};
pub use status::IncidentStatus;
