// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend trait for the tutoring REST service.

use async_trait::async_trait;

use crate::error::TutoriaError;
use crate::types::{
    AvailabilityWindow, NewReservation, Reservation, ReservationId, StudentId, TutoringSession,
    TutoringSessionId,
};

/// The REST backend as seen by the schedule engine.
///
/// The backend owns conflict detection, persistence and authorization. An
/// implementation only transports requests and decodes responses.
#[async_trait]
pub trait SchedulingBackend: Send + Sync + 'static {
    /// All tutoring sessions.
    async fn list_sessions(&self) -> Result<Vec<TutoringSession>, TutoriaError>;

    /// All availability windows currently open for booking.
    async fn list_active_windows(&self) -> Result<Vec<AvailabilityWindow>, TutoriaError>;

    /// Availability windows belonging to one tutoring session.
    async fn windows_for_session(
        &self,
        session: TutoringSessionId,
    ) -> Result<Vec<AvailabilityWindow>, TutoriaError>;

    /// Submits a reservation; the backend decides whether it is accepted.
    async fn create_reservation(
        &self,
        request: &NewReservation,
    ) -> Result<Reservation, TutoriaError>;

    /// Cancels a reservation with a reason.
    async fn cancel_reservation(
        &self,
        id: ReservationId,
        reason: &str,
    ) -> Result<Reservation, TutoriaError>;

    /// Reservations made by one student.
    async fn student_reservations(
        &self,
        student: StudentId,
    ) -> Result<Vec<Reservation>, TutoriaError>;
}
