// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fifteen-minute reservation slots.
//!
//! A window is cut into consecutive slots starting at its start time. A
//! trailing remainder shorter than a full slot is not offered, so a 50-minute
//! window yields three slots.

use std::iter::FusedIterator;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use tutoria_core::AvailabilityWindow;
use tutoria_core::time::format_short;

/// Length of a bookable slot in minutes.
pub const SLOT_MINUTES: u32 = 15;

const SLOT_SECONDS: u32 = SLOT_MINUTES * 60;

/// A bookable sub-interval of an availability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSlot {
    #[serde(with = "tutoria_core::time::clock")]
    pub start_time: NaiveTime,
    #[serde(with = "tutoria_core::time::clock")]
    pub end_time: NaiveTime,
    /// `"HH:MM - HH:MM"`.
    pub display_label: String,
}

impl ReservationSlot {
    fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_time,
            end_time,
            display_label: format!("{} - {}", format_short(start_time), format_short(end_time)),
        }
    }
}

/// Iterator over the slots of `[start, end)`. Cloning restarts from the
/// clone's current position.
#[derive(Debug, Clone)]
pub struct Slots {
    next: u32,
    end: u32,
}

impl Iterator for Slots {
    type Item = ReservationSlot;

    fn next(&mut self) -> Option<ReservationSlot> {
        let slot_end = self.next + SLOT_SECONDS;
        if slot_end > self.end {
            return None;
        }
        let start = NaiveTime::from_num_seconds_from_midnight_opt(self.next, 0)?;
        let end = NaiveTime::from_num_seconds_from_midnight_opt(slot_end, 0)?;
        self.next = slot_end;
        Some(ReservationSlot::new(start, end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end.saturating_sub(self.next) / SLOT_SECONDS) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Slots {}

impl FusedIterator for Slots {}

/// Slots fully contained in `[start, end)`.
///
/// Empty when the range is shorter than one slot, including `end <= start`.
/// Ranges are not carried across midnight.
pub fn slots(start: NaiveTime, end: NaiveTime) -> Slots {
    let next = start.num_seconds_from_midnight();
    let end = end.num_seconds_from_midnight().max(next);
    Slots { next, end }
}

pub fn slots_for_window(window: &AvailabilityWindow) -> Slots {
    slots(window.start_time, window.end_time)
}

/// The slot of `window` starting exactly at `start`, if there is one.
pub fn slot_starting_at(window: &AvailabilityWindow, start: NaiveTime) -> Option<ReservationSlot> {
    slots_for_window(window).find(|slot| slot.start_time == start)
}
