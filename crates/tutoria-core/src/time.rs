// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wall-clock time helpers.
//!
//! The backend exchanges times of day as `"HH:MM:SS"`. Forms and the CLI
//! also produce `"HH:MM"`, so parsing accepts both.

use chrono::NaiveTime;

use crate::error::TutoriaError;

/// Parse `"HH:MM:SS"` or `"HH:MM"` into a [`NaiveTime`].
pub fn parse_clock(s: &str) -> Result<NaiveTime, TutoriaError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| TutoriaError::InvalidTime(s.to_string()))
}

/// Format as `"HH:MM:SS"`, the backend wire form.
pub fn format_clock(t: NaiveTime) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Format as `"HH:MM"`.
pub fn format_short(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Serde adapter for `"HH:MM:SS"` fields.
pub mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_clock(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_clock(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_forms() {
        let a = parse_clock("08:15:00").unwrap();
        let b = parse_clock("08:15").unwrap();
        assert_eq!(a, b);
        assert_eq!(format_clock(b), "08:15:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_clock("8 o'clock"),
            Err(TutoriaError::InvalidTime(_))
        ));
        assert!(parse_clock("25:00:00").is_err());
    }

    #[test]
    fn formats() {
        let t = parse_clock("09:05:00").unwrap();
        assert_eq!(format_clock(t), "09:05:00");
        assert_eq!(format_short(t), "09:05");
    }
}
