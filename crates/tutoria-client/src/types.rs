// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types that only the REST client needs.

use serde::{Deserialize, Serialize};
use tutoria_core::StudentId;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub code: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub code: String,
    #[serde(alias = "id_usuario")]
    pub user_id: StudentId,
}

/// Error body returned by the backend.
///
/// Handlers disagree on the field name, so all known spellings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// The first non-empty message field.
    pub fn text(&self) -> Option<&str> {
        [&self.mensaje, &self.message, &self.error]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}
