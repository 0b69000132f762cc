//! Seed data configuration: the bootstrap administrator and default locations.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ADMIN_EMAIL;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeedConfig {
    /// Email of the bootstrap administrator. Default: `admin@airport.com`.
    pub admin_email: Option<String>,
    /// Pre-hashed credential for the bootstrap administrator.
    /// Without it no administrator is seeded.
    pub admin_password_hash: Option<String>,
    /// Whether to seed the default airport locations. Default: true.
    pub seed_locations: Option<bool>,
}

impl SeedConfig {
    pub fn effective_admin_email(&self) -> &str {
        self.admin_email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL)
    }

    pub fn effective_seed_locations(&self) -> bool {
        self.seed_locations.unwrap_or(true)
    }
}
