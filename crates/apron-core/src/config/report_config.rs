//! Completion report configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REPORT_DIR;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory completion reports are written to. Default: `reports`.
    pub output_dir: Option<String>,
}

impl ReportConfig {
    pub fn effective_output_dir(&self) -> PathBuf {
        PathBuf::from(self.output_dir.as_deref().unwrap_or(DEFAULT_REPORT_DIR))
    }
}
