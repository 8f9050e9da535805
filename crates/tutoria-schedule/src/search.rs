// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text session search.

use std::collections::HashMap;

use serde::Serialize;
use tutoria_core::{AvailabilityWindow, TutoringSession, TutoringSessionId};

/// Default number of suggestions returned.
pub const DEFAULT_LIMIT: usize = 8;

/// A session matching a search query, with capacity summed over all of its
/// windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: TutoringSessionId,
    pub name: String,
    pub tutor_name: String,
    pub capacity_available: u32,
    pub capacity_total: u32,
    /// `"available/total"`.
    pub capacity_label: String,
}

/// Sessions whose name, tutor name or career name contains `query`,
/// ignoring case. At most `limit` results, in input order. A blank query
/// matches nothing.
pub fn search_sessions(
    query: &str,
    sessions: &[TutoringSession],
    windows: &[AvailabilityWindow],
    limit: usize,
) -> Vec<Suggestion> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut capacity: HashMap<TutoringSessionId, (u32, u32)> = HashMap::new();
    for window in windows {
        let entry = capacity.entry(window.tutoring_session_id).or_default();
        entry.0 += window.capacity_available();
        entry.1 += window.capacity_max;
    }

    sessions
        .iter()
        .filter(|s| {
            [&s.name, &s.tutor_name, &s.career_name]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .take(limit)
        .map(|s| {
            let (available, total) = capacity.get(&s.id).copied().unwrap_or_default();
            Suggestion {
                id: s.id,
                name: s.name.clone(),
                tutor_name: s.tutor_name.clone(),
                capacity_available: available,
                capacity_total: total,
                capacity_label: format!("{available}/{total}"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutoria_core::{CareerId, TutorId, Weekday, WindowId};

    fn session(id: i64, name: &str, tutor: &str) -> TutoringSession {
        TutoringSession {
            id: TutoringSessionId(id),
            tutor_id: TutorId(id * 10),
            career_id: CareerId(1),
            name: name.to_string(),
            description: String::new(),
            location: String::new(),
            tutor_name: tutor.to_string(),
            career_name: "Mathematics".to_string(),
            lifecycle_state: 1,
        }
    }

    fn window(id: i64, session: i64, max: u32, used: u32) -> AvailabilityWindow {
        let start = tutoria_core::time::parse_clock("08:00").unwrap();
        AvailabilityWindow {
            id: WindowId(id),
            tutoring_session_id: TutoringSessionId(session),
            weekday: Weekday::Monday,
            date: None,
            start_time: start,
            end_time: start + chrono::TimeDelta::hours(1),
            capacity_max: max,
            capacity_used: used,
            state_id: 1,
        }
    }

    fn fixtures() -> (Vec<TutoringSession>, Vec<AvailabilityWindow>) {
        (
            vec![
                session(1, "Calculus I", "Ana Gómez"),
                session(2, "Physics", "Luis Torres"),
                session(3, "Calculus II", "Ana Gómez"),
            ],
            vec![window(10, 1, 6, 2), window(11, 1, 4, 4), window(12, 3, 5, 0)],
        )
    }

    #[test]
    fn blank_query_matches_nothing() {
        let (sessions, windows) = fixtures();
        assert!(search_sessions("", &sessions, &windows, DEFAULT_LIMIT).is_empty());
        assert!(search_sessions("   ", &sessions, &windows, DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        let (sessions, windows) = fixtures();
        assert!(search_sessions("chemistry", &sessions, &windows, DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn tutor_substring_sums_capacity() {
        let (sessions, windows) = fixtures();
        let out = search_sessions("gómez", &sessions, &windows, DEFAULT_LIMIT);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "Calculus I");
        assert_eq!(out[0].capacity_label, "4/10");
        assert_eq!(out[1].name, "Calculus II");
        assert_eq!(out[1].capacity_label, "5/5");
    }

    #[test]
    fn name_match_is_case_insensitive_and_trimmed() {
        let (sessions, windows) = fixtures();
        let out = search_sessions("  PHYS ", &sessions, &windows, DEFAULT_LIMIT);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].capacity_label, "0/0");
    }

    #[test]
    fn career_name_matches() {
        let (sessions, windows) = fixtures();
        assert_eq!(search_sessions("mathem", &sessions, &windows, DEFAULT_LIMIT).len(), 3);
    }

    #[test]
    fn limit_applies_in_input_order() {
        let sessions: Vec<_> = (1..=12)
            .map(|i| session(i, &format!("Algebra {i}"), "Tutor"))
            .collect();
        let out = search_sessions("algebra", &sessions, &[], DEFAULT_LIMIT);
        assert_eq!(out.len(), 8);
        assert_eq!(out[0].id, TutoringSessionId(1));
        assert_eq!(out[7].id, TutoringSessionId(8));
    }
}
