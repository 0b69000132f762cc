//! # apron-engine
//!
//! Incident lifecycle and assignment rules on top of the entity store.
//!
//! The rule modules ([`availability`], [`assignment`], [`lifecycle`],
//! [`cascade`]) are plain functions over a connection or transaction handle.
//! [`IncidentService`] owns the store and the report emitter, authorizes each
//! call, and decides which rules share a transaction.

pub mod assignment;
pub mod authz;
pub mod availability;
pub mod cascade;
pub mod lifecycle;
pub mod report;
pub mod service;

pub use assignment::AssignOutcome;
pub use authz::Capability;
pub use availability::{BusyIncident, EmployeeAvailability};
pub use cascade::{DeletionOutcome, Reassignment};
pub use report::FileReportEmitter;
pub use service::{Credentials, IncidentService, SeedSummary};
