//! Engine errors and their mapping onto the caller-facing taxonomy.

use super::error_code::{self, ApronErrorCode};
use super::{ReportError, StorageError};

/// Caller-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// The operation is not allowed in the incident's current status.
    InvalidState,
    /// The caller lacks the required role or ownership.
    Forbidden,
    /// A caller-supplied reference is malformed or inconsistent.
    BadRequest,
    /// A collaborator failed or seed data is missing.
    InternalError,
}

/// Errors raised by the incident lifecycle and assignment engine.
#[derive(Debug, thiserror::Error)]
pub enum IncidentError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("incident {incident_id} is '{status}' and cannot be changed")]
    InvalidState { incident_id: i64, status: String },

    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("bad request: {reason}")]
    BadRequest { reason: String },

    #[error("not configured: {what}")]
    NotConfigured { what: String },

    #[error("report rendering failed: {0}")]
    Render(#[from] ReportError),

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

pub type IncidentResult<T> = Result<T, IncidentError>;

impl IncidentError {
    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::NotConfigured { .. } | Self::Render(_) | Self::Storage(_) => {
                ErrorKind::InternalError
            }
        }
    }
}

impl From<rusqlite::Error> for IncidentError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::from_sqlite(err))
    }
}

impl ApronErrorCode for IncidentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::InvalidState { .. } => error_code::INVALID_STATE,
            Self::Forbidden { .. } => error_code::FORBIDDEN,
            Self::BadRequest { .. } => error_code::BAD_REQUEST,
            Self::NotConfigured { .. } => error_code::NOT_CONFIGURED,
            Self::Render(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
