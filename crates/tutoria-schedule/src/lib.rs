// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar engine for the Tutoria scheduler.
//!
//! Builds the weekly availability grid, cuts windows into fifteen-minute
//! reservation slots, searches sessions, and drives the calendar screen
//! through [`CalendarView`].

pub mod grid;
pub mod search;
pub mod slots;
pub mod view;

pub use grid::{AvailabilityGrid, CellView, GridCell, GridDiagnostic, GridKey, TimeBand, build_grid};
pub use search::{DEFAULT_LIMIT, Suggestion, search_sessions};
pub use slots::{ReservationSlot, SLOT_MINUTES, Slots, slot_starting_at, slots, slots_for_window};
pub use view::{CalendarView, Degraded, LoadOutcome, ReserveError, Selection};
