//! Report emitter failures.

use super::error_code::{self, ApronErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report I/O failed for {path}: {message}")]
    Io { path: String, message: String },

    #[error("report formatting failed: {message}")]
    Format { message: String },
}

impl ApronErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::RENDER_ERROR
    }
}
