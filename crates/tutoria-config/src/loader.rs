// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tutoria.toml` > `~/.config/tutoria/tutoria.toml` > `/etc/tutoria/tutoria.toml`
//! with environment variable overrides via `TUTORIA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TutoriaConfig;

/// Sections that environment variables may target.
const ENV_SECTIONS: &[&str] = &["app", "backend", "calendar"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tutoria/tutoria.toml` (system-wide)
/// 3. `~/.config/tutoria/tutoria.toml` (user XDG config)
/// 4. `./tutoria.toml` (local directory)
/// 5. `TUTORIA_*` environment variables
pub fn load_config() -> Result<TutoriaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TutoriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TutoriaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TutoriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TutoriaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Config files of the standard hierarchy, lowest precedence first.
///
/// The user file is left out when the platform has no config directory.
pub fn config_files() -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from("/etc/tutoria/tutoria.toml")];
    if let Some(dir) = dirs::config_dir() {
        files.push(dir.join("tutoria").join("tutoria.toml"));
    }
    files.push(PathBuf::from("tutoria.toml"));
    files
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    config_files()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(TutoriaConfig::default())),
            |figment, file| figment.merge(Toml::file(file)),
        )
        .merge(env_provider())
}

/// Map `TUTORIA_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses an explicit section prefix instead of `Env::split("_")` so keys with
/// underscores survive: `TUTORIA_BACKEND_BASE_URL` maps to `backend.base_url`.
/// Variables outside the known sections (e.g. `TUTORIA_PASSWORD`) are ignored.
fn env_provider() -> Env {
    Env::prefixed("TUTORIA_")
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ENV_SECTIONS
                .iter()
                .any(|section| key.starts_with(&format!("{section}_")))
        })
        .map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            let mapped = ENV_SECTIONS
                .iter()
                .find_map(|section| {
                    key.strip_prefix(&format!("{section}_"))
                        .map(|rest| format!("{section}.{rest}"))
                })
                .unwrap_or(key);
            mapped.into()
        })
}
