//! Unit tests for config module
//!
//! Defaults, TOML parsing, pattern validation and file loading.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::fs;

use tempfile::TempDir;

use super::*;
use crate::ControllerError;

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert!(config.players.ignored.is_empty());
}

#[test]
fn config_empty_toml() {
    let config = Config::from_toml("").unwrap();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert!(config.players.ignored.is_empty());
}

#[test]
fn config_full_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [players]
        ignored = ["chromium", "^org\\.mpris\\.MediaPlayer2\\.firefox\\."]
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.players.ignored.len(), 2);

    let patterns = config.players.ignore_patterns().unwrap();
    assert!(patterns[0].is_match("org.mpris.MediaPlayer2.chromium.instance42"));
    assert!(patterns[1].is_match("org.mpris.MediaPlayer2.firefox.instance_1_7"));
    assert!(!patterns[1].is_match("org.mpris.MediaPlayer2.spotify"));
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config {
        general: GeneralConfig {
            log_level: LogLevel::Trace,
        },
        players: PlayersConfig {
            ignored: vec!["kdeconnect".to_string()],
        },
    };

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized = Config::from_toml(&toml_str).unwrap();

    assert_eq!(deserialized.general.log_level, LogLevel::Trace);
    assert_eq!(deserialized.players.ignored, original.players.ignored);
}

#[test]
fn config_unknown_log_level_rejected() {
    let result = Config::from_toml(
        r#"
        [general]
        log_level = "loud"
    "#,
    );

    assert!(matches!(result, Err(ControllerError::TomlParseError { .. })));
}

#[test]
fn config_invalid_pattern_rejected() {
    let result = Config::from_toml(
        r#"
        [players]
        ignored = ["valid", "(unclosed"]
    "#,
    );

    match result {
        Err(ControllerError::ConfigValidation { component, details }) => {
            assert_eq!(component, "players.ignored");
            assert!(details.contains("(unclosed"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn config_invalid_toml() {
    let result = Config::from_toml("[general\nmissing closing bracket");

    assert!(matches!(result, Err(ControllerError::TomlParseError { .. })));
}

#[test]
fn load_from_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[general]\nlog_level = \"warn\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Warn);
}

#[test]
fn load_from_reports_file_location() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[players\n").unwrap();

    match Config::load_from(&path) {
        Err(ControllerError::TomlParseError { location, .. }) => {
            assert!(location.ends_with("config.toml"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();

    let result = Config::load_from(&dir.path().join("absent.toml"));

    assert!(matches!(result, Err(ControllerError::Io(_))));
}

#[test]
fn log_level_directives() {
    assert_eq!(LogLevel::Error.as_directive(), "error");
    assert_eq!(LogLevel::Trace.to_string(), "trace");
}

#[test]
fn json_schema_describes_sections() {
    let schema = Config::json_schema().unwrap();

    assert!(schema.contains("\"general\""));
    assert!(schema.contains("\"players\""));
    assert!(schema.contains("log_level"));
}

#[test]
fn config_paths_end_with_app_dir() {
    if std::env::var("HOME").is_err() && std::env::var("XDG_CONFIG_HOME").is_err() {
        return;
    }

    let main_config = ConfigPaths::main_config().unwrap();

    assert!(main_config.ends_with("mpris-controller/config.toml"));
}
