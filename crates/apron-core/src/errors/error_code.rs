//! ApronErrorCode trait for the presentation boundary.

/// Every error enum implements this to expose a stable machine-readable code
/// that a routing layer can map to its own status codes.
pub trait ApronErrorCode {
    /// Returns the error code string (e.g., "NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INVALID_STATE: &str = "INVALID_STATE";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const NOT_CONFIGURED: &str = "NOT_CONFIGURED";
pub const RENDER_ERROR: &str = "RENDER_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
