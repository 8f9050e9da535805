// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutoria grid`, `tutoria search` and `tutoria slots` commands.
//!
//! Each command loads the calendar once and prints either a text report or,
//! with `--json`, a structured document for scripting.

use colored::Colorize;
use serde::Serialize;
use tutoria_core::time::format_short;
use tutoria_core::{SchedulingBackend, TutorId, TutoriaError, Weekday, WindowId};
use tutoria_schedule::{
    AvailabilityGrid, CalendarView, CellView, Degraded, GridCell, GridKey, ReservationSlot,
    Selection, Suggestion, TimeBand,
};

use crate::output::{capacity, heading, print_json, use_color};

/// One occupied cell in `--json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellOutput<'a> {
    pub band: TimeBand,
    pub weekday: Weekday,
    pub entries: &'a [CellView],
}

/// Structured grid output for `--json` mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOutput<'a> {
    pub cells: Vec<CellOutput<'a>>,
    pub degraded: Degraded,
    pub diagnostics: Vec<String>,
}

impl<'a> GridOutput<'a> {
    pub fn new(grid: &'a AvailabilityGrid, degraded: Degraded) -> Self {
        Self {
            cells: grid
                .cells()
                .map(|(key, cell)| CellOutput {
                    band: key.band,
                    weekday: key.weekday,
                    entries: cell.entries(),
                })
                .collect(),
            degraded,
            diagnostics: grid.diagnostics().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Structured slot output for `--json` mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsOutput<'a> {
    pub window_id: WindowId,
    pub title: &'a str,
    pub slots: &'a [ReservationSlot],
}

fn degraded_notice(out: &mut String, degraded: Degraded, use_color: bool) {
    let mut missing = Vec::new();
    if degraded.sessions {
        missing.push("tutoring sessions");
    }
    if degraded.windows {
        missing.push("availability windows");
    }
    if missing.is_empty() {
        return;
    }
    let line = format!(
        "Could not load {}; showing partial data.",
        missing.join(" and ")
    );
    if use_color {
        out.push_str(&format!("  {} {}\n", "!".yellow(), line.yellow()));
    } else {
        out.push_str(&format!("  [WARN] {line}\n"));
    }
}

/// Render the weekly grid, one block per time band.
pub fn render_grid(grid: &AvailabilityGrid, degraded: Degraded, use_color: bool) -> String {
    let mut out = String::new();
    heading(&mut out, "Weekly availability");
    degraded_notice(&mut out, degraded, use_color);

    if grid.is_empty() {
        out.push_str("    No availability.\n\n");
        return out;
    }

    for band in TimeBand::ALL {
        let row: Vec<(&GridKey, &GridCell)> =
            grid.cells().filter(|(key, _)| key.band == band).collect();
        if row.is_empty() {
            continue;
        }
        if use_color {
            out.push_str(&format!("  {}\n", band.label().bold()));
        } else {
            out.push_str(&format!("  {band}\n"));
        }
        for (key, cell) in row {
            for (i, entry) in cell.entries().iter().enumerate() {
                let day = if i == 0 { key.weekday.to_string() } else { String::new() };
                let title = if use_color {
                    entry.title.bold().to_string()
                } else {
                    entry.title.clone()
                };
                out.push_str(&format!(
                    "    {day:<10} {title}  [{}]  window {}\n",
                    capacity(&entry.capacity_label, entry.capacity_available, use_color),
                    entry.window_id
                ));
                if !entry.subtitle.is_empty() {
                    out.push_str(&format!("    {:<10} {}\n", "", entry.subtitle));
                }
            }
        }
    }

    let skipped = grid.diagnostics().iter().filter(|d| d.is_skip()).count();
    let shared = grid.diagnostics().len() - skipped;
    if skipped > 0 || shared > 0 {
        out.push_str(&format!(
            "\n  {skipped} window(s) not shown, {shared} sharing a cell\n"
        ));
    }
    out.push('\n');
    out
}

/// Render search suggestions.
pub fn render_suggestions(query: &str, suggestions: &[Suggestion], use_color: bool) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Sessions matching \"{}\"", query.trim()));
    if suggestions.is_empty() {
        out.push_str("    No matches.\n\n");
        return out;
    }
    for s in suggestions {
        out.push_str(&format!(
            "    {:<5} {}  {}  [{}]\n",
            s.id,
            s.name,
            s.tutor_name,
            capacity(&s.capacity_label, s.capacity_available, use_color)
        ));
    }
    out.push('\n');
    out
}

/// Render the bookable slots of one window.
pub fn render_slots(entry: &CellView, placement: &str, slots: &[ReservationSlot]) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("{}, {placement}", entry.title));
    if slots.is_empty() {
        out.push_str("    No bookable slots.\n\n");
        return out;
    }
    for slot in slots {
        out.push_str(&format!("    {}\n", slot.display_label));
    }
    out.push('\n');
    out
}

/// Run `tutoria grid`.
pub async fn run_grid<B: SchedulingBackend>(
    view: &CalendarView<B>,
    tutor: Option<TutorId>,
    json: bool,
    plain: bool,
) -> Result<(), TutoriaError> {
    view.set_tutor_filter(tutor).await;
    view.load().await;
    let grid = view.grid().await;
    let degraded = view.degraded().await;

    if json {
        print_json(&GridOutput::new(&grid, degraded));
    } else {
        print!("{}", render_grid(&grid, degraded, use_color(plain)));
    }
    Ok(())
}

/// Run `tutoria search`.
pub async fn run_search<B: SchedulingBackend>(
    view: &CalendarView<B>,
    query: &str,
    limit: usize,
    json: bool,
    plain: bool,
) -> Result<(), TutoriaError> {
    view.load().await;
    let suggestions = view.search(query, limit).await;

    if json {
        print_json(&suggestions);
    } else {
        print!("{}", render_suggestions(query, &suggestions, use_color(plain)));
    }
    Ok(())
}

/// Select `window` in a freshly loaded calendar and return its slots.
///
/// The placement is the grid cell, or the window's own day and hours when
/// the grid does not show it.
pub async fn window_slots<B: SchedulingBackend>(
    view: &CalendarView<B>,
    window: WindowId,
) -> Result<(CellView, String, Vec<ReservationSlot>), TutoriaError> {
    view.load().await;
    let entry = view.select_window(window).await?;
    let selection = view
        .selection()
        .await
        .ok_or_else(|| TutoriaError::Internal("selection lost after select".into()))?;
    let placement = match selection {
        Selection::Cell { key, .. } => key.to_string(),
        Selection::Window(id) => view
            .window(id)
            .await
            .map(|w| {
                format!(
                    "{} {} - {} (not in grid)",
                    w.weekday,
                    format_short(w.start_time),
                    format_short(w.end_time)
                )
            })
            .unwrap_or_default(),
    };
    let slots = view.slots_for_selection().await.unwrap_or_default();
    Ok((entry, placement, slots))
}

/// Run `tutoria slots`.
pub async fn run_slots<B: SchedulingBackend>(
    view: &CalendarView<B>,
    window: WindowId,
    json: bool,
) -> Result<(), TutoriaError> {
    let (entry, placement, slots) = window_slots(view, window).await?;

    if json {
        print_json(&SlotsOutput {
            window_id: window,
            title: &entry.title,
            slots: &slots,
        });
    } else {
        print!("{}", render_slots(&entry, &placement, &slots));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use tutoria_core::{SessionContext, StudentId};
    use tutoria_schedule::{DEFAULT_LIMIT, build_grid};
    use tutoria_test_utils::MockBackend;
    use tutoria_test_utils::fixtures::{session, window};

    fn backend() -> Arc<MockBackend> {
        Arc::new(MockBackend::with_data(
            vec![session(1, 7, "Calculus I")],
            vec![
                window(10, 1, Weekday::Monday, "08:00", "09:00", 6, 2),
                window(11, 1, Weekday::Monday, "08:30", "09:30", 2, 2),
                window(12, 1, Weekday::Sunday, "10:00", "11:00", 2, 0),
            ],
        ))
    }

    fn view() -> CalendarView<MockBackend> {
        CalendarView::new(backend(), SessionContext::new("tok", "2182197", StudentId(4)))
    }

    #[test]
    fn grid_text_lists_cells() {
        let (sessions, windows) = (
            vec![session(1, 7, "Calculus I")],
            vec![window(10, 1, Weekday::Monday, "08:00", "09:00", 6, 2)],
        );
        let grid = build_grid(&windows, &sessions, None);
        let text = render_grid(&grid, Degraded::default(), false);
        assert!(text.contains("08:00 - 10:00"));
        assert!(text.contains("Monday"));
        assert!(text.contains("Calculus I  [4/6]  window 10"));
        assert!(!text.contains("[WARN]"));
    }

    #[test]
    fn degraded_grid_warns() {
        let grid = AvailabilityGrid::default();
        let text = render_grid(
            &grid,
            Degraded {
                sessions: true,
                windows: false,
            },
            false,
        );
        assert!(text.contains("[WARN] Could not load tutoring sessions"));
        assert!(text.contains("No availability."));
    }

    #[tokio::test]
    async fn grid_json_reports_shared_and_skipped() {
        let view = view();
        view.load().await;
        let grid = view.grid().await;
        let value = serde_json::to_value(GridOutput::new(&grid, Degraded::default())).unwrap();

        let cells = value["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0]["band"], "08:00 - 10:00");
        assert_eq!(cells[0]["weekday"], "Monday");
        assert_eq!(cells[0]["entries"].as_array().unwrap().len(), 2);
        assert_eq!(cells[0]["entries"][1]["styleClass"], "dept-1 full");
        assert_eq!(value["diagnostics"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn slots_for_window() {
        let view = view();
        let (entry, placement, slots) = window_slots(&view, WindowId(10)).await.unwrap();
        assert_eq!(entry.title, "Calculus I");
        assert_eq!(placement, "Monday 08:00 - 10:00");
        assert_eq!(slots.len(), 4);

        let text = render_slots(&entry, &placement, &slots);
        assert!(text.contains("Calculus I, Monday 08:00 - 10:00"));
        assert!(text.contains("08:45 - 09:00"));
    }

    #[tokio::test]
    async fn slots_for_window_outside_grid() {
        let view = view();
        let (entry, placement, slots) = window_slots(&view, WindowId(12)).await.unwrap();
        assert_eq!(entry.title, "Calculus I");
        assert_eq!(placement, "Sunday 10:00 - 11:00 (not in grid)");
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].display_label, "10:00 - 10:15");
    }

    #[tokio::test]
    async fn slots_for_unknown_window_fails() {
        let view = view();
        let err = window_slots(&view, WindowId(99)).await.unwrap_err();
        assert!(matches!(
            err,
            TutoriaError::NotFound {
                entity: "availability window",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn search_text() {
        let view = view();
        view.load().await;
        let suggestions = view.search("calc", DEFAULT_LIMIT).await;
        let text = render_suggestions("calc", &suggestions, false);
        assert!(text.contains("Calculus I"));
        assert!(text.contains("[6/10]"));
        assert!(render_suggestions("x", &[], false).contains("No matches."));
    }
}
