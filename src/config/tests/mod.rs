//! Unit tests for config module
//!
//! Tests configuration types, defaults, and validation.

#![allow(clippy::panic)]

use std::time::Duration;

use crate::{
    ClipmsError,
    config::{Config, LogLevel, Selection},
};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.server.app_name, "clipboard");
    assert_eq!(config.server.selection, Selection::Clipboard);
    assert_eq!(config.server.poll_interval(), Duration::from_secs(1));
    assert!(config.probe.enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn config_serialize_toml() {
    let toml_str = Config::default().to_toml_string().unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[server]"));
    assert!(toml_str.contains("[probe]"));
}

#[test]
fn config_empty_toml() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_partial_section_keeps_defaults() {
    let config = Config::from_toml_str(
        r#"
        [server]
        selection = "primary"
        "#,
    )
    .unwrap();

    assert_eq!(config.server.selection, Selection::Primary);
    assert_eq!(config.server.app_name, "clipboard");
    assert_eq!(config.server.poll_interval_ms, 1000);
}

#[test]
fn config_toml_value_types() {
    let config = Config::from_toml_str(
        r#"
        [general]
        log_level = "debug"
        log_to_file = true

        [server]
        app_name = "desk_2"
        poll_interval_ms = 250

        [probe]
        enabled = false
        timeout_ms = 500
        "#,
    )
    .unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert!(config.general.log_to_file);
    assert_eq!(config.server.app_name, "desk_2");
    assert_eq!(config.server.poll_interval(), Duration::from_millis(250));
    assert!(!config.probe.enabled);
    assert_eq!(config.probe.timeout(), Duration::from_millis(500));
}

#[test]
fn config_invalid_toml() {
    let result = Config::from_toml_str(
        r#"
        [server
        app_name = "broken"
        "#,
    );

    assert!(matches!(result, Err(ClipmsError::TomlParseError { .. })));
}

#[test]
fn config_rejects_app_name_with_path_separator() {
    let result = Config::from_toml_str(
        r#"
        [server]
        app_name = "clip/board"
        "#,
    );

    let Err(ClipmsError::InvalidConfigField { field, section, .. }) = result else {
        panic!("expected invalid field error, got {result:?}");
    };
    assert_eq!(section, "server");
    assert_eq!(field, "app_name");
}

#[test]
fn config_rejects_zero_interval_and_timeout() {
    let interval = Config::from_toml_str("[server]\npoll_interval_ms = 0\n");
    assert!(matches!(
        interval,
        Err(ClipmsError::InvalidConfigField { ref field, .. }) if field == "poll_interval_ms"
    ));

    let timeout = Config::from_toml_str("[probe]\ntimeout_ms = 0\n");
    assert!(matches!(
        timeout,
        Err(ClipmsError::InvalidConfigField { ref field, .. }) if field == "timeout_ms"
    ));
}

#[test]
fn config_unknown_fields_are_ignored() {
    let config = Config::from_toml_str(
        r#"
        [general]
        log_level = "warn"
        unknown_field = "ignored"

        [unknown_section]
        some_field = 1
        "#,
    )
    .unwrap();

    assert_eq!(config.general.log_level, LogLevel::Warn);
}

#[test]
fn json_schema_lists_sections() {
    let schema = serde_json::to_value(Config::json_schema()).unwrap();
    let properties = schema.get("properties").unwrap();

    assert!(properties.get("general").is_some());
    assert!(properties.get("server").is_some());
    assert!(properties.get("probe").is_some());
}
