// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Tutoria configuration system.

use std::io::Write;

use secrecy::ExposeSecret;

use tutoria_config::diagnostic::ConfigError;
use tutoria_config::model::TutoriaConfig;
use tutoria_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use tutoria_core::{Modality, StudentId};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[app]
log_level = "debug"
student_id = 4

[backend]
base_url = "https://tutorias.example.edu/api"
timeout_secs = 5
max_retries = 2
token = "abc"

[calendar]
max_suggestions = 5
default_modality = "Virtual"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.app.student_id, Some(StudentId(4)));
    assert_eq!(config.backend.base_url, "https://tutorias.example.edu/api");
    assert_eq!(config.backend.timeout_secs, 5);
    assert_eq!(config.backend.max_retries, 2);
    assert_eq!(
        config.backend.token.as_ref().map(|t| t.expose_secret()),
        Some("abc")
    );
    assert_eq!(config.calendar.max_suggestions, 5);
    assert_eq!(config.calendar.default_modality, Modality::Virtual);
}

/// The bearer token never shows up in debug output.
#[test]
fn token_is_redacted_in_debug() {
    let config = load_config_from_str("[backend]\ntoken = \"jwt-secret-value\"\n")
        .expect("valid TOML should deserialize");
    let debug = format!("{config:?}");
    assert!(!debug.contains("jwt-secret-value"));
    assert!(config.backend.token.is_some());
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.app.log_level, "info");
    assert!(config.app.student_id.is_none());
    assert_eq!(config.backend.base_url, "http://localhost:8080/api");
    assert_eq!(config.backend.timeout_secs, 10);
    assert_eq!(config.backend.max_retries, 1);
    assert!(config.backend.token.is_none());
    assert_eq!(config.calendar.max_suggestions, 8);
    assert_eq!(config.calendar.default_modality, Modality::InPerson);
}

/// A typo in [backend] is reported as an unknown key with a suggestion.
#[test]
fn unknown_key_gets_suggestion() {
    let toml = r#"
[backend]
base_ulr = "http://localhost:8080/api"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "base_ulr" && s == "base_url"
        )
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// Unknown top-level sections are rejected.
#[test]
fn unknown_section_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// A wrong value type is reported as InvalidType.
#[test]
fn wrong_type_reported() {
    let toml = r#"
[backend]
timeout_secs = "ten"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject string timeout");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { detail, .. } if detail.contains("ten") || detail.contains("string"))),
        "got: {errors:?}"
    );
}

/// An unknown modality is rejected at load time.
#[test]
fn unknown_modality_rejected() {
    let toml = r#"
[calendar]
default_modality = "Hybrid"
"#;
    assert!(load_and_validate_str(toml).is_err());
}

/// Semantic validation runs after a successful load.
#[test]
fn validation_runs_after_load() {
    let toml = r#"
[backend]
base_url = "localhost:8080"
"#;
    let errors = load_and_validate_str(toml).expect_err("base_url without scheme");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))));
}

/// Dot-notation overrides behave like the env provider's mapping.
#[test]
fn dotted_override_wins_over_toml() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: TutoriaConfig = Figment::new()
        .merge(Serialized::defaults(TutoriaConfig::default()))
        .merge(Toml::string("[backend]\nbase_url = \"http://from-toml\"\n"))
        .merge(("backend.base_url", "http://from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.backend.base_url, "http://from-env");
}

/// Explicit config files are loaded and validated.
#[test]
#[serial_test::serial]
fn explicit_path_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[calendar]\nmax_suggestions = 3").unwrap();

    let config = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.calendar.max_suggestions, 3);
}

/// Explicit config files report spans against their own content.
#[test]
#[serial_test::serial]
fn explicit_path_errors_have_spans() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[app]\nlog_levle = \"debug\"").unwrap();

    let errors = load_and_validate_path(file.path()).expect_err("typo should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "log_level"
    )));
}
