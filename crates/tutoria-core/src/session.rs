// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logged-in user context.
//!
//! A [`SessionContext`] is created from a successful login and handed to the
//! collaborators that need the bearer credential or the user id. Dropping it
//! (or clearing it from the client) is the logout.

use secrecy::{ExposeSecret, SecretString};

use crate::types::StudentId;

/// Credential and identity of the logged-in user.
#[derive(Clone)]
pub struct SessionContext {
    token: SecretString,
    code: String,
    user_id: StudentId,
}

impl SessionContext {
    pub fn new(token: impl Into<String>, code: impl Into<String>, user_id: StudentId) -> Self {
        Self {
            token: SecretString::from(token.into()),
            code: code.into(),
            user_id,
        }
    }

    /// Builds a context around a token that is already held as a secret.
    pub fn from_secret(token: SecretString, code: impl Into<String>, user_id: StudentId) -> Self {
        Self {
            token,
            code: code.into(),
            user_id,
        }
    }

    /// The university code the user logged in with.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn user_id(&self) -> StudentId {
        self.user_id
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }

    /// Raw token, for handing to the shell after `login`.
    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("code", &self.code)
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
