//! Top-level Apron configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ReportConfig, SeedConfig, StorageConfig};
use crate::constants::MAX_READ_POOL_SIZE;
use crate::errors::ConfigError;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "apron.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`APRON_*`)
/// 2. Project config (`apron.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApronConfig {
    pub storage: StorageConfig,
    pub reports: ReportConfig,
    pub seed: SeedConfig,
}

impl ApronConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ApronConfig) -> Result<(), ConfigError> {
        if let Some(size) = config.storage.read_pool_size {
            if size == 0 || size > MAX_READ_POOL_SIZE {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
                });
            }
        }
        if let Some(ref dir) = config.reports.output_dir {
            if dir.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "reports.output_dir".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if let Some(ref email) = config.seed.admin_email {
            if !email.contains('@') {
                return Err(ConfigError::ValidationFailed {
                    field: "seed.admin_email".to_string(),
                    message: "must be an email address".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut ApronConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: ApronConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` override.
    fn merge(base: &mut ApronConfig, other: &ApronConfig) {
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
        if other.reports.output_dir.is_some() {
            base.reports.output_dir = other.reports.output_dir.clone();
        }
        if other.seed.admin_email.is_some() {
            base.seed.admin_email = other.seed.admin_email.clone();
        }
        if other.seed.admin_password_hash.is_some() {
            base.seed.admin_password_hash = other.seed.admin_password_hash.clone();
        }
        if other.seed.seed_locations.is_some() {
            base.seed.seed_locations = other.seed.seed_locations;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(config: &mut ApronConfig) {
        if let Ok(val) = std::env::var("APRON_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("APRON_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("APRON_REPORT_DIR") {
            config.reports.output_dir = Some(val);
        }
        if let Ok(val) = std::env::var("APRON_SEED_ADMIN_EMAIL") {
            config.seed.admin_email = Some(val);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
