use serde::{Deserialize, Serialize};

use crate::constants::is_terminal_status_name;
use crate::ids::StatusId;

/// One row of the seeded status table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentStatus {
    pub id: StatusId,
    pub name: String,
    pub description: Option<String>,
}

impl IncidentStatus {
    /// Terminal statuses forbid edits and reassignment.
    pub fn is_terminal(&self) -> bool {
        is_terminal_status_name(&self.name)
    }
}
