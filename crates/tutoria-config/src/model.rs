// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tutoria scheduler.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tutoria_core::{Modality, StudentId};

/// Top-level Tutoria configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TutoriaConfig {
    /// Process-level settings.
    #[serde(default)]
    pub app: AppConfig,

    /// REST backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Calendar view behavior.
    #[serde(default)]
    pub calendar: CalendarConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Student id to book with when no login session supplies one.
    #[serde(default)]
    pub student_id: Option<StudentId>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            student_id: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// REST backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts for GET requests that hit a transient status.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Bearer token. Usually supplied via `TUTORIA_BACKEND_TOKEN`.
    /// Never serialized and redacted from `Debug`.
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            token: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    1
}

/// Calendar view configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// Maximum number of search suggestions returned.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Modality used for new reservations unless overridden.
    #[serde(default)]
    pub default_modality: Modality,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            default_modality: Modality::default(),
        }
    }
}

fn default_max_suggestions() -> usize {
    8
}
