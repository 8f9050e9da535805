// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Tutoria scheduler.
//!
//! Settings come from compiled defaults, the `tutoria.toml` hierarchy and
//! `TUTORIA_*` variables. Every entry point below both extracts and
//! validates, returning all problems found as [`ConfigError`]s that
//! [`render_errors`] prints with source spans and key suggestions.
//!
//! ```no_run
//! let config = tutoria_config::load_and_validate().unwrap_or_else(|errors| {
//!     tutoria_config::render_errors(&errors);
//!     std::process::exit(1);
//! });
//! println!("backend at {}", config.backend.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TutoriaConfig;

/// Named TOML documents used to place error spans.
type Sources = Vec<(String, String)>;

/// Standard hierarchy plus env overrides.
pub fn load_and_validate() -> Result<TutoriaConfig, Vec<ConfigError>> {
    checked(loader::load_config(), || read_sources(&loader::config_files()))
}

/// One explicit file plus env overrides; backs `--config`.
pub fn load_and_validate_path(path: &Path) -> Result<TutoriaConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_path(path), || {
        read_sources(&[path.to_path_buf()])
    })
}

/// An in-memory TOML document, without files or env.
pub fn load_and_validate_str(toml_content: &str) -> Result<TutoriaConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validate an extracted config, or turn the extraction error into
/// diagnostics. Sources are only read on failure.
fn checked(
    extracted: Result<TutoriaConfig, figment::Error>,
    sources: impl FnOnce() -> Sources,
) -> Result<TutoriaConfig, Vec<ConfigError>> {
    let config = extracted.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Contents of the files that exist, keyed by their absolute path.
fn read_sources(files: &[PathBuf]) -> Sources {
    files
        .iter()
        .filter_map(|file| {
            let content = std::fs::read_to_string(file).ok()?;
            let shown = std::path::absolute(file).unwrap_or_else(|_| file.clone());
            Some((shown.display().to_string(), content))
        })
        .collect()
}
