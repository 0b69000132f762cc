//! Configuration system for Apron.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod apron_config;
pub mod report_config;
pub mod seed_config;
pub mod storage_config;

pub use apron_config::ApronConfig;
pub use report_config::ReportConfig;
pub use seed_config::SeedConfig;
pub use storage_config::StorageConfig;
