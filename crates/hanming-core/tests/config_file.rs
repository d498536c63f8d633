use hanming_core::{ConfigError, ConfigManager, HanmingConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hanming.toml");
    fs::write(
        &path,
        r#"
[completion]
endpoint_url = "http://127.0.0.1:9000/api/ai_completion"
timeout_secs = 3
max_retries = 1

[analysis]
include_recommendations = false
"#,
    )
    .unwrap();

    let manager = ConfigManager::load_from_path(&path).unwrap();
    let config = manager.config();

    assert_eq!(manager.config_path(), Some(path.as_path()));
    assert_eq!(config.completion.timeout_secs, 3);
    assert_eq!(config.completion.max_retries, 1);
    assert!(config.completion.enabled);
    assert!(!config.analysis.include_recommendations);
    assert_eq!(config.analysis.notification_capacity, 16);
    assert_eq!(config.logging.format, "pretty");
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let result = ConfigManager::load_from_path(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[completion\ntimeout_secs = ").unwrap();

    assert!(matches!(
        ConfigManager::load_from_path(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("retries.toml");
    fs::write(&path, "[completion]\nmax_retries = 4\n").unwrap();

    assert!(matches!(
        ConfigManager::load_from_path(&path),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_default_config_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    ConfigManager::create_default_config(&path).unwrap();

    let written: HanmingConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        written.completion.endpoint_url,
        HanmingConfig::default().completion.endpoint_url
    );
    assert!(ConfigManager::validate_config(&written).is_ok());
}
