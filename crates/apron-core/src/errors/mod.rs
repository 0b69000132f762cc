//! Error handling for Apron.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod incident_error;
pub mod report_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::ApronErrorCode;
pub use incident_error::{ErrorKind, IncidentError, IncidentResult};
pub use report_error::ReportError;
pub use storage_error::StorageError;
