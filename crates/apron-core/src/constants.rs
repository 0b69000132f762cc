//! Seeded status identities and other fixed values shared across crates.

use crate::ids::StatusId;

/// Status assigned to every newly created incident.
pub const STATUS_NEW_ID: StatusId = StatusId(1);
pub const STATUS_NEW: &str = "new";

/// Intermediate status, entered when the first response is recorded.
pub const STATUS_IN_PROGRESS_ID: StatusId = StatusId(2);
pub const STATUS_IN_PROGRESS: &str = "in-progress";

/// Terminal status.
pub const STATUS_COMPLETED_ID: StatusId = StatusId(3);
pub const STATUS_COMPLETED: &str = "completed";

/// Status names treated as terminal. "closed" is accepted as an alias.
pub const TERMINAL_STATUS_NAMES: &[&str] = &[STATUS_COMPLETED, "closed"];

/// Default administrator seeded on first start.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@airport.com";

/// Default directory for completion reports.
pub const DEFAULT_REPORT_DIR: &str = "reports";

/// Default number of read connections.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Upper bound on read connections.
pub const MAX_READ_POOL_SIZE: usize = 8;

/// Returns true if `name` is a terminal status name (case-insensitive).
pub fn is_terminal_status_name(name: &str) -> bool {
    TERMINAL_STATUS_NAMES
        .iter()
        .any(|terminal| terminal.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_and_closed_are_terminal() {
        assert!(is_terminal_status_name("completed"));
        assert!(is_terminal_status_name("Closed"));
        assert!(is_terminal_status_name(" COMPLETED "));
    }

    #[test]
    fn open_statuses_are_not_terminal() {
        assert!(!is_terminal_status_name(STATUS_NEW));
        assert!(!is_terminal_status_name(STATUS_IN_PROGRESS));
        assert!(!is_terminal_status_name(""));
    }
}
