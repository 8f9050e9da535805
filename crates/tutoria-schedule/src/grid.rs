// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weekly availability grid.
//!
//! [`build_grid`] joins availability windows to their tutoring sessions and
//! buckets them into a fixed Monday–Friday × two-hour-band grid. Records
//! that cannot be placed are skipped and reported as [`GridDiagnostic`]s;
//! nothing here fails.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use tracing::{debug, warn};
use tutoria_core::{
    AvailabilityWindow, TutorId, TutoringSession, TutoringSessionId, Weekday, WindowId,
};

/// Separator between the parts of a subtitle or tooltip.
const SEPARATOR: &str = " • ";

/// A two-hour row of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct TimeBand {
    start_hour: u32,
}

impl TimeBand {
    /// Band length in hours.
    pub const HOURS: u32 = 2;

    /// The seven bands from 06:00 to 20:00, top to bottom.
    pub const ALL: [TimeBand; 7] = [
        TimeBand::at(6),
        TimeBand::at(8),
        TimeBand::at(10),
        TimeBand::at(12),
        TimeBand::at(14),
        TimeBand::at(16),
        TimeBand::at(18),
    ];

    const fn at(start_hour: u32) -> Self {
        Self { start_hour }
    }

    /// The band whose start hour equals `time`'s hour. Minutes are ignored,
    /// so 09:00 matches no band.
    pub fn for_time(time: NaiveTime) -> Option<TimeBand> {
        let hour = time.hour();
        Self::ALL.into_iter().find(|band| band.start_hour == hour)
    }

    pub fn start_hour(self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(self) -> u32 {
        self.start_hour + Self::HOURS
    }

    /// Row label, e.g. `"08:00 - 10:00"`.
    pub fn label(self) -> String {
        format!("{:02}:00 - {:02}:00", self.start_hour, self.end_hour())
    }
}

impl fmt::Display for TimeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<TimeBand> for String {
    fn from(band: TimeBand) -> Self {
        band.label()
    }
}

/// Address of a grid cell. Orders by band, then weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GridKey {
    pub band: TimeBand,
    pub weekday: Weekday,
}

impl GridKey {
    pub fn new(band: TimeBand, weekday: Weekday) -> Self {
        Self { band, weekday }
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.band)
    }
}

/// Display data for one availability window placed in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub title: String,
    pub subtitle: String,
    pub capacity_label: String,
    pub style_class: String,
    pub tooltip_text: String,
    pub window_id: WindowId,
    pub session_id: TutoringSessionId,
    pub capacity_available: u32,
}

impl CellView {
    pub(crate) fn new(window: &AvailabilityWindow, session: &TutoringSession) -> Self {
        let available = window.capacity_available();
        let mut style_class = format!("dept-{}", session.career_id);
        if available == 0 {
            style_class.push_str(" full");
        }

        Self {
            title: session.name.clone(),
            subtitle: join_present(&[&session.description, &session.tutor_name]),
            capacity_label: window.capacity_label(),
            style_class,
            tooltip_text: join_present(&[&session.location, &session.career_name]),
            window_id: window.id,
            session_id: session.id,
            capacity_available: available,
        }
    }

    pub fn is_full(&self) -> bool {
        self.capacity_available == 0
    }
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// All windows placed in one cell, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridCell {
    entries: Vec<CellView>,
}

impl GridCell {
    /// The first window placed in the cell.
    pub fn primary(&self) -> Option<&CellView> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[CellView] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A record that was skipped or needs attention while building the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridDiagnostic {
    /// The window references a session that was not fetched.
    OrphanWindow {
        window: WindowId,
        session: TutoringSessionId,
    },
    /// The window's start hour is not the start of any band.
    UnmatchedBand { window: WindowId, start: NaiveTime },
    /// The window falls on Saturday or Sunday.
    WeekendWindow { window: WindowId, weekday: Weekday },
    /// The window landed in a cell that already held another window.
    Collision {
        key: GridKey,
        window: WindowId,
        existing: WindowId,
    },
}

impl GridDiagnostic {
    /// Window the diagnostic is about.
    pub fn window(&self) -> WindowId {
        match self {
            Self::OrphanWindow { window, .. }
            | Self::UnmatchedBand { window, .. }
            | Self::WeekendWindow { window, .. }
            | Self::Collision { window, .. } => *window,
        }
    }

    /// True when the window was left out of the grid.
    pub fn is_skip(&self) -> bool {
        !matches!(self, Self::Collision { .. })
    }
}

impl fmt::Display for GridDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrphanWindow { window, session } => {
                write!(f, "window {window} references unknown session {session}")
            }
            Self::UnmatchedBand { window, start } => write!(
                f,
                "window {window} starts at {} which matches no time band",
                start.format("%H:%M")
            ),
            Self::WeekendWindow { window, weekday } => {
                write!(f, "window {window} falls on {weekday}")
            }
            Self::Collision {
                key,
                window,
                existing,
            } => write!(f, "window {window} shares cell {key} with window {existing}"),
        }
    }
}

/// The weekly grid: cells keyed by (band, weekday) plus build diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityGrid {
    cells: BTreeMap<GridKey, GridCell>,
    diagnostics: Vec<GridDiagnostic>,
}

impl AvailabilityGrid {
    pub fn cell(&self, key: &GridKey) -> Option<&GridCell> {
        self.cells.get(key)
    }

    /// Looks a cell up by its band and weekday.
    pub fn get(&self, band: TimeBand, weekday: Weekday) -> Option<&GridCell> {
        self.cells.get(&GridKey::new(band, weekday))
    }

    /// Occupied cells in band-then-weekday order.
    pub fn cells(&self) -> impl Iterator<Item = (&GridKey, &GridCell)> {
        self.cells.iter()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of windows placed across all cells.
    pub fn window_count(&self) -> usize {
        self.cells.values().map(GridCell::len).sum()
    }

    pub fn diagnostics(&self) -> &[GridDiagnostic] {
        &self.diagnostics
    }

    /// Finds the cell and entry holding `window`.
    pub fn locate(&self, window: WindowId) -> Option<(GridKey, &CellView)> {
        self.cells.iter().find_map(|(key, cell)| {
            cell.entries
                .iter()
                .find(|entry| entry.window_id == window)
                .map(|entry| (*key, entry))
        })
    }

    /// Cell key and entry index of `window`.
    pub fn position(&self, window: WindowId) -> Option<(GridKey, usize)> {
        self.cells.iter().find_map(|(key, cell)| {
            cell.entries
                .iter()
                .position(|entry| entry.window_id == window)
                .map(|index| (*key, index))
        })
    }
}

/// Builds the weekly grid from fetched sessions and windows.
///
/// With `tutor` set, only windows of sessions owned by that tutor are
/// placed; a tutor without sessions yields an empty grid. Inputs are not
/// modified and the same inputs always give the same grid.
pub fn build_grid(
    windows: &[AvailabilityWindow],
    sessions: &[TutoringSession],
    tutor: Option<TutorId>,
) -> AvailabilityGrid {
    let mut grid = AvailabilityGrid::default();

    let owned: Option<HashSet<TutoringSessionId>> = tutor.map(|tutor| {
        sessions
            .iter()
            .filter(|s| s.tutor_id == tutor)
            .map(|s| s.id)
            .collect()
    });
    if let Some(owned) = &owned
        && owned.is_empty()
    {
        debug!(tutor = ?tutor, "tutor owns no sessions, grid is empty");
        return grid;
    }

    let by_id: HashMap<TutoringSessionId, &TutoringSession> =
        sessions.iter().map(|s| (s.id, s)).collect();

    for window in windows {
        if let Some(owned) = &owned
            && !owned.contains(&window.tutoring_session_id)
        {
            continue;
        }

        let Some(session) = by_id.get(&window.tutoring_session_id) else {
            debug!(window = %window.id, session = %window.tutoring_session_id, "skipping window without session");
            grid.diagnostics.push(GridDiagnostic::OrphanWindow {
                window: window.id,
                session: window.tutoring_session_id,
            });
            continue;
        };

        let Some(band) = TimeBand::for_time(window.start_time) else {
            debug!(window = %window.id, start = %window.start_time, "skipping window outside time bands");
            grid.diagnostics.push(GridDiagnostic::UnmatchedBand {
                window: window.id,
                start: window.start_time,
            });
            continue;
        };

        if !window.weekday.is_workday() {
            debug!(window = %window.id, weekday = %window.weekday, "skipping weekend window");
            grid.diagnostics.push(GridDiagnostic::WeekendWindow {
                window: window.id,
                weekday: window.weekday,
            });
            continue;
        }

        let key = GridKey::new(band, window.weekday);
        let cell = grid.cells.entry(key).or_default();
        if let Some(existing) = cell.primary() {
            warn!(cell = %key, window = %window.id, existing = %existing.window_id, "windows share a grid cell");
            grid.diagnostics.push(GridDiagnostic::Collision {
                key,
                window: window.id,
                existing: existing.window_id,
            });
        }
        cell.entries.push(CellView::new(window, session));
    }

    debug!(
        cells = grid.len(),
        windows = grid.window_count(),
        diagnostics = grid.diagnostics.len(),
        "availability grid built"
    );
    grid
}
