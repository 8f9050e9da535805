// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for domain records used across test suites.

use chrono::NaiveTime;
use tutoria_core::{
    AvailabilityWindow, CareerId, TutorId, TutoringSession, TutoringSessionId, Weekday, WindowId,
};

/// An active tutoring session with placeholder descriptive fields.
pub fn session(id: i64, tutor: i64, name: &str) -> TutoringSession {
    TutoringSession {
        id: TutoringSessionId(id),
        tutor_id: TutorId(tutor),
        career_id: CareerId(1),
        name: name.to_string(),
        description: String::new(),
        location: String::new(),
        tutor_name: format!("Tutor {tutor}"),
        career_name: String::new(),
        lifecycle_state: 1,
    }
}

/// An availability window; times are `"HH:MM"` or `"HH:MM:SS"`.
///
/// # Panics
///
/// Panics if either time does not parse.
pub fn window(
    id: i64,
    session: i64,
    weekday: Weekday,
    start: &str,
    end: &str,
    capacity_max: u32,
    capacity_used: u32,
) -> AvailabilityWindow {
    AvailabilityWindow {
        id: WindowId(id),
        tutoring_session_id: TutoringSessionId(session),
        weekday,
        date: None,
        start_time: clock(start),
        end_time: clock(end),
        capacity_max,
        capacity_used,
        state_id: 1,
    }
}

/// # Panics
///
/// Panics if `s` is not a valid time.
pub fn clock(s: &str) -> NaiveTime {
    match tutoria_core::time::parse_clock(s) {
        Ok(t) => t,
        Err(e) => panic!("bad fixture time {s:?}: {e}"),
    }
}
