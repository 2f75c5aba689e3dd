//! Tests for loading `AppConfig` from files and the environment.

mod support;

use crm_backend::config::{AppConfig, ConfigError};

#[test]
fn test_from_file_full_config() {
    let (_dir, path) = support::write_config(
        r#"
[server]
host = "127.0.0.1"
port = 9000
body_limit_bytes = 2048

[store]
seed = false

[logging]
level = "crm_backend=debug"
"#,
    );

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.body_limit_bytes, 2048);
    assert!(!config.store.seed);
    assert_eq!(config.logging.level, "crm_backend=debug");
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_from_invalid_file() {
    let (_dir, path) = support::write_config("[server\nport = 1");
    let err = AppConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_load_uses_crm_config_then_env() {
    let (_dir, path) = support::write_config(
        r#"
[server]
port = 9100

[store]
seed = false
"#,
    );
    let path = path.to_string_lossy().into_owned();

    let vars = [("CRM_CONFIG", path.as_str()), ("PORT", "9200")];
    let config = support::with_config_env(&vars, || AppConfig::load().unwrap());

    assert_eq!(config.server.port, 9200);
    assert!(!config.store.seed);
}

#[test]
fn test_load_rejects_bad_env_value() {
    let (_dir, path) = support::write_config("");
    let path = path.to_string_lossy().into_owned();

    let vars = [("CRM_CONFIG", path.as_str()), ("CRM_SEED", "sometimes")];
    let result = support::with_config_env(&vars, AppConfig::load);

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_load_with_missing_crm_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml").to_string_lossy().into_owned();

    let result = support::with_config_env(&[("CRM_CONFIG", path.as_str())], AppConfig::load);
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}
