//! Tests for the Apron configuration system.

use std::sync::Mutex;

use apron_core::config::apron_config::PROJECT_CONFIG_FILE;
use apron_core::config::ApronConfig;
use apron_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_apron_env_vars() {
    for key in [
        "APRON_DB_PATH",
        "APRON_READ_POOL_SIZE",
        "APRON_REPORT_DIR",
        "APRON_SEED_ADMIN_EMAIL",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_without_any_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_apron_env_vars();

    let dir = tempdir();
    let config = ApronConfig::load(dir.path()).unwrap();

    assert!(config.storage.effective_db_path().is_none());
    assert_eq!(config.storage.effective_read_pool_size(), 4);
    assert_eq!(
        config.reports.effective_output_dir(),
        std::path::PathBuf::from("reports")
    );
    assert_eq!(config.seed.effective_admin_email(), "admin@airport.com");
    assert!(config.seed.effective_seed_locations());
    assert!(config.seed.admin_password_hash.is_none());
}

#[test]
fn env_overrides_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_apron_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join(PROJECT_CONFIG_FILE),
        r#"
[storage]
db_path = "/var/lib/apron/file.db"
read_pool_size = 2

[reports]
output_dir = "/var/lib/apron/reports"
"#,
    )
    .unwrap();

    std::env::set_var("APRON_DB_PATH", "/tmp/env.db");

    let config = ApronConfig::load(dir.path()).unwrap();
    clear_apron_env_vars();

    assert_eq!(config.storage.db_path.as_deref(), Some("/tmp/env.db"));
    assert_eq!(config.storage.effective_read_pool_size(), 2);
    assert_eq!(config.reports.output_dir.as_deref(), Some("/var/lib/apron/reports"));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_apron_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[storage\nbroken").unwrap();

    let err = ApronConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn read_pool_size_out_of_range_fails_validation() {
    let config = ApronConfig::from_toml("[storage]\nread_pool_size = 0\n").unwrap();
    let err = ApronConfig::validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "storage.read_pool_size")
        }
        other => panic!("unexpected error: {other}"),
    }

    let config = ApronConfig::from_toml("[storage]\nread_pool_size = 9\n").unwrap();
    assert!(ApronConfig::validate(&config).is_err());
}

#[test]
fn admin_email_must_look_like_an_email() {
    let config = ApronConfig::from_toml("[seed]\nadmin_email = \"admin\"\n").unwrap();
    assert!(ApronConfig::validate(&config).is_err());
}

#[test]
fn unknown_keys_are_ignored() {
    let config = ApronConfig::from_toml(
        r#"
[storage]
read_pool_size = 3
legacy_option = true
"#,
    )
    .unwrap();
    assert_eq!(config.storage.read_pool_size, Some(3));
}

#[test]
fn toml_roundtrip_preserves_values() {
    let config = ApronConfig::from_toml(
        r#"
[seed]
admin_email = "ops@airport.com"
seed_locations = false
"#,
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = ApronConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.seed.effective_admin_email(), "ops@airport.com");
    assert!(!reparsed.seed.effective_seed_locations());
}
