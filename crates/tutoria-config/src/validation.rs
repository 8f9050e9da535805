// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use secrecy::ExposeSecret;

use crate::diagnostic::ConfigError;
use crate::model::TutoriaConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &TutoriaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.backend.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "backend.base_url must not be empty".to_string(),
        });
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("backend.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.backend.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "backend.timeout_secs must be greater than 0".to_string(),
        });
    }

    if let Some(token) = &config.backend.token
        && token.expose_secret().trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "backend.token must not be blank when set".to_string(),
        });
    }

    if config.calendar.max_suggestions == 0 {
        errors.push(ConfigError::Validation {
            message: "calendar.max_suggestions must be at least 1".to_string(),
        });
    }

    let level = config.app.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of: {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = TutoriaConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = TutoriaConfig::default();
        config.backend.base_url = "ftp://host/api".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))
        ));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = TutoriaConfig::default();
        config.backend.base_url = String::new();
        config.backend.timeout_secs = 0;
        config.calendar.max_suggestions = 0;
        config.app.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn blank_token_fails_validation() {
        let mut config = TutoriaConfig::default();
        config.backend.token = Some("   ".into());
        assert!(validate_config(&config).is_err());
    }
}
