//! Static configuration loading tests

use std::io::Write;

use linkvault::config::StaticConfig;
use linkvault::errors::ShortenerError;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("linkvault.toml");
    let mut file = std::fs::File::create(&path).expect("Failed to create config file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config file");
    path.display().to_string()
}

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"
[server]
host = "0.0.0.0"
port = 9090
stage = "dev"

[store]
backend = "memory"

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = StaticConfig::load(Some(&path)).expect("config should load");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.stage, "dev");
    assert_eq!(config.store.backend, "memory");
    assert_eq!(config.logging.format, "json");
    assert!(!config.store.table_name.is_empty());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("absent.toml").display().to_string();

    let config = StaticConfig::load(Some(&path)).expect("defaults should load");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.store.backend, "memory");
}

#[test]
fn test_unknown_backend_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"
[store]
backend = "cassandra"
"#,
    );

    let err = StaticConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ShortenerError::Config(_)));
    assert!(err.message().contains("cassandra"));
}

#[test]
fn test_save_and_reload_sample() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("sample.toml");

    StaticConfig::default()
        .save_to_file(&path)
        .expect("sample should be written");
    assert!(path.exists());

    let config = StaticConfig::load(Some(&path.display().to_string())).expect("sample should load");
    assert_eq!(config.server.stage, "prod");
}
