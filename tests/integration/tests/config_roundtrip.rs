//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration can be serialized, written to disk,
//! and loaded back with identical field values.

use chatgate_core::config::Config;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chatgate.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    // Default server settings should survive the roundtrip
    assert_eq!(loaded.server.port, config.server.port);
    assert_eq!(loaded.server.host, config.server.host);
    // Chat defaults should survive the roundtrip
    assert_eq!(loaded.chat.history_window, config.chat.history_window);
    assert_eq!(loaded.chat.max_message_words, config.chat.max_message_words);
    assert_eq!(loaded.models.default, config.models.default);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chatgate.json5");

    let mut config = Config::default();
    config.server.port = 9090;
    config.auth.password = "hunter2".into();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.server.port, 9090);
    assert_eq!(loaded.auth.password.expose_secret(), "hunter2");
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/chatgate.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}

#[test]
fn test_config_validate_roundtripped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chatgate.json5");

    let mut config = Config::default();
    config.auth.password = "hunter2".into();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert!(loaded.validate().is_ok());
}
