// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutoria reserve`, `tutoria cancel` and `tutoria reservations` commands.

use colored::Colorize;
use tutoria_core::time::{format_short, parse_clock};
use tutoria_core::{
    Modality, Reservation, ReservationId, SchedulingBackend, SessionContext, StudentId,
    TutoriaError, WindowId,
};
use tutoria_schedule::{CalendarView, slot_starting_at};

use crate::calendar::window_slots;
use crate::output::{heading, marker, print_json, use_color};

/// Options for `tutoria reserve`.
#[derive(Debug, Clone)]
pub struct ReserveRequest {
    pub window: WindowId,
    pub start: String,
    pub notes: Option<String>,
    pub modality: Modality,
}

/// The student id reservations are made for.
///
/// A token configured without `app.student_id` has no usable identity.
pub fn require_student(session: &SessionContext) -> Result<StudentId, TutoriaError> {
    match session.user_id() {
        StudentId(0) => Err(TutoriaError::Config(
            "app.student_id is not set; export TUTORIA_APP_STUDENT_ID printed by `tutoria login`"
                .into(),
        )),
        id => Ok(id),
    }
}

fn state_label(reservation: &Reservation) -> &str {
    reservation.state_name.as_deref().unwrap_or("unknown")
}

/// One line per reservation.
pub fn render_reservations(reservations: &[Reservation], use_color: bool) -> String {
    let mut out = String::new();
    heading(&mut out, "My reservations");
    if reservations.is_empty() {
        out.push_str("    No reservations.\n\n");
        return out;
    }
    for r in reservations {
        let time = format!("{} - {}", format_short(r.start_time), format_short(r.end_time));
        let state = if use_color && r.cancelled_at.is_some() {
            state_label(r).dimmed().to_string()
        } else {
            state_label(r).to_string()
        };
        out.push_str(&format!(
            "    #{:<6} {:<28} {time}  {state}\n",
            r.id,
            r.session_name.as_deref().unwrap_or("-"),
        ));
        if let Some(reason) = &r.cancellation_reason {
            out.push_str(&format!("    {:<7} reason: {reason}\n", ""));
        }
    }
    out.push('\n');
    out
}

/// Books the slot of `request.window` starting at `request.start`.
pub async fn reserve<B: SchedulingBackend>(
    view: &CalendarView<B>,
    request: ReserveRequest,
) -> Result<Reservation, TutoriaError> {
    require_student(view.session())?;
    let start = parse_clock(&request.start)?;
    window_slots(view, request.window).await?;
    let slot = view
        .window(request.window)
        .await
        .and_then(|window| slot_starting_at(&window, start))
        .ok_or_else(|| TutoriaError::NotFound {
            entity: "slot",
            id: format!("{} in window {}", format_short(start), request.window),
        })?;

    view.reserve(&slot, request.notes, request.modality)
        .await
        .map_err(|e| e.source)
}

/// Run `tutoria reserve`.
pub async fn run_reserve<B: SchedulingBackend>(
    view: &CalendarView<B>,
    request: ReserveRequest,
    json: bool,
    plain: bool,
) -> Result<(), TutoriaError> {
    let reservation = reserve(view, request).await?;
    if json {
        print_json(&reservation);
    } else {
        println!(
            "  {} Reserved {} - {} (reservation {})",
            marker(true, use_color(plain)),
            format_short(reservation.start_time),
            format_short(reservation.end_time),
            reservation.id
        );
    }
    Ok(())
}

/// Run `tutoria cancel`.
pub async fn run_cancel<B: SchedulingBackend>(
    backend: &B,
    id: ReservationId,
    reason: &str,
    json: bool,
    plain: bool,
) -> Result<(), TutoriaError> {
    if reason.trim().is_empty() {
        return Err(TutoriaError::Config(
            "a cancellation reason is required".into(),
        ));
    }
    let reservation = backend.cancel_reservation(id, reason.trim()).await?;
    if json {
        print_json(&reservation);
    } else {
        println!(
            "  {} Cancelled reservation {} ({})",
            marker(true, use_color(plain)),
            reservation.id,
            state_label(&reservation)
        );
    }
    Ok(())
}

/// Run `tutoria reservations`.
pub async fn run_reservations<B: SchedulingBackend>(
    backend: &B,
    session: &SessionContext,
    json: bool,
    plain: bool,
) -> Result<(), TutoriaError> {
    let student = require_student(session)?;
    let reservations = backend.student_reservations(student).await?;
    if json {
        print_json(&reservations);
    } else {
        print!("{}", render_reservations(&reservations, use_color(plain)));
    }
    Ok(())
}
