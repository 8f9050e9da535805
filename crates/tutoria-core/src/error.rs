// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tutoria scheduler.

use std::fmt;

use thiserror::Error;

/// Why the backend refused a reservation, as far as the client can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationErrorKind {
    /// Another reservation already holds the requested slot.
    SlotTaken,
    /// The availability window has no capacity left.
    NoCapacity,
    /// The requested slot lies outside the availability window.
    OutOfRange,
    /// The requested slot is not exactly one slot long.
    InvalidLength,
    /// Any other rejection. The backend's own message, when present, is
    /// what the student sees.
    Rejected,
}

impl ReservationErrorKind {
    /// Message shown to the student when a reservation fails with this kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::SlotTaken => {
                "This time slot is already taken. Please pick another available slot."
            }
            Self::NoCapacity => "There is no capacity left for this tutoring session.",
            Self::OutOfRange => "The selected time is outside the availability window.",
            Self::InvalidLength => "A reservation must last exactly 15 minutes.",
            Self::Rejected => "The reservation could not be created. Please try again.",
        }
    }
}

impl fmt::Display for ReservationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SlotTaken => "slot taken",
            Self::NoCapacity => "no capacity",
            Self::OutOfRange => "out of range",
            Self::InvalidLength => "invalid length",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// The primary error type used across the Tutoria crates.
#[derive(Debug, Error)]
pub enum TutoriaError {
    /// Configuration errors (bad base URL, unusable header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The backend could not be reached or answered with a non-success status.
    #[error("backend error: {message}")]
    Backend {
        message: String,
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body could not be decoded.
    #[error("decode error: {message}")]
    Decode {
        message: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backend rejected a reservation request.
    #[error("reservation {kind}: {message}")]
    Reservation {
        kind: ReservationErrorKind,
        message: String,
    },

    /// A referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A wall-clock time string could not be parsed.
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// The operation needs a logged-in session.
    #[error("not logged in")]
    Unauthenticated,

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TutoriaError {
    /// Text suitable for showing to an end user.
    ///
    /// Classified reservation rejections map to fixed messages. An
    /// unclassified rejection shows the backend's message when it sent one.
    /// Everything else falls back to the error's display form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Reservation {
                kind: ReservationErrorKind::Rejected,
                message,
            } if !message.trim().is_empty() => message.trim().to_string(),
            Self::Reservation { kind, .. } => kind.user_message().to_string(),
            Self::Unauthenticated => {
                "No session data found. Please log in again.".to_string()
            }
            Self::Backend { status: None, .. } | Self::Timeout { .. } => {
                "Could not reach the server. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}
