//! # apron-core
//!
//! Foundation crate for the Apron incident engine.
//! Defines ids, models, caller identity, errors, config, traits, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod models;
pub mod time;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ApronConfig;
pub use errors::{ErrorKind, IncidentError, StorageError};
pub use identity::{Caller, Role};
pub use ids::{AttachmentId, EmployeeId, IncidentId, LocationId, ResponseId, SourceId, StatusId};
