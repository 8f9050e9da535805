// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tutoria scheduler.
//!
//! Holds the domain types exchanged with the tutoring backend, the shared
//! error type, the [`SchedulingBackend`] trait and the logged-in
//! [`SessionContext`].

pub mod error;
pub mod session;
pub mod time;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ReservationErrorKind, TutoriaError};
pub use session::SessionContext;
pub use traits::SchedulingBackend;
pub use types::{
    AvailabilityWindow, CancelReservation, CareerId, Modality, NewReservation, Reservation,
    ReservationId, StudentId, TutorId, TutoringSession, TutoringSessionId, Weekday, WindowId,
};
