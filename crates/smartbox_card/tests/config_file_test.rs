use std::fs;

use smartbox_card::Config;
use smartbox_card::LogLevel;
use smartbox_card::config::ConfigError;
use tempfile::TempDir;

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("smartbox-card.toml");

    fs::write(
        &path,
        r#"
        [logging]
        level = "warn"

        [card]
        entity = "remote.living_room"

        [[remotes]]
        entity_id = "remote.living_room"
        device_id = "stb-0001"
        name = "Living Room"
        kind = "stb"
        "#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.logging.level, LogLevel::Warn);
    assert_eq!(config.card.entity.as_deref(), Some("remote.living_room"));
    assert_eq!(config.remotes.len(), 1);
    assert_eq!(config.server.port, 8565);
}

#[test]
fn test_parse_error_reports_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[card\nentity = ").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("Failed to parse TOML"));
}

#[test]
fn test_unknown_remote_kind_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad-kind.toml");
    fs::write(
        &path,
        r#"
        [[remotes]]
        entity_id = "remote.x"
        device_id = "x"
        name = "X"
        kind = "vcr"
        "#,
    )
    .unwrap();

    assert!(Config::from_file(&path).is_err());
}
