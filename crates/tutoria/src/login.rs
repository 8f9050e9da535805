// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutoria login` command.
//!
//! Exchanges a university code and password for a bearer token. The shell
//! keeps the session: the command prints `export` lines for the token and
//! student id, which the other commands read back through configuration.

use secrecy::ExposeSecret;
use serde::Serialize;
use tutoria_client::HttpBackend;
use tutoria_core::{SessionContext, StudentId, TutoriaError};

/// Environment variable read before prompting for the password.
pub const PASSWORD_ENV: &str = "TUTORIA_PASSWORD";

/// Structured login output for `--json` mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutput<'a> {
    pub token: &'a str,
    pub code: &'a str,
    pub user_id: StudentId,
}

fn read_password() -> Result<String, TutoriaError> {
    match std::env::var(PASSWORD_ENV) {
        Ok(password) if !password.is_empty() => Ok(password),
        _ => rpassword::prompt_password("Password: ")
            .map_err(|e| TutoriaError::Internal(format!("failed to read password: {e}"))),
    }
}

/// Shell lines that make the session available to later commands.
pub fn export_lines(session: &SessionContext) -> String {
    format!(
        "export TUTORIA_BACKEND_TOKEN={}\nexport TUTORIA_APP_STUDENT_ID={}\n",
        session.token().expose_secret(),
        session.user_id()
    )
}

/// Run `tutoria login`.
pub async fn run_login(backend: &HttpBackend, code: &str, json: bool) -> Result<(), TutoriaError> {
    let password = read_password()?;
    let session = backend.login(code, &password).await?;

    if json {
        crate::output::print_json(&LoginOutput {
            token: session.token().expose_secret(),
            code: session.code(),
            user_id: session.user_id(),
        });
    } else {
        print!("{}", export_lines(&session));
    }
    Ok(())
}
