// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reservation rejection classification.
//!
//! The backend reports why it refused a reservation only in free text
//! (Spanish or English), so the kind is recovered from keywords.

use tutoria_core::ReservationErrorKind;

/// Classify a rejected reservation from its HTTP status and backend message.
pub fn classify_reservation_failure(status: u16, message: &str) -> ReservationErrorKind {
    let msg = message.to_lowercase();

    if msg.contains("ya existe una reserva") || msg.contains("already reserved") || msg.contains("already exists") {
        return ReservationErrorKind::SlotTaken;
    }

    if !matches!(status, 400 | 409) {
        return ReservationErrorKind::Rejected;
    }

    if msg.contains("cupo") || msg.contains("capacity") {
        ReservationErrorKind::NoCapacity
    } else if msg.contains("rango") || msg.contains("dentro") || msg.contains("range") || msg.contains("outside") {
        ReservationErrorKind::OutOfRange
    } else if msg.contains("15 minutos") || msg.contains("15 minutes") {
        ReservationErrorKind::InvalidLength
    } else {
        ReservationErrorKind::Rejected
    }
}
