// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the schedule engine and the outside world.

pub mod backend;

pub use backend::SchedulingBackend;
