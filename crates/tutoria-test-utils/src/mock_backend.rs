// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory backend for deterministic testing.
//!
//! `MockBackend` implements `SchedulingBackend` over canned collections,
//! records every reservation request, and fails calls on demand.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tutoria_core::{
    AvailabilityWindow, NewReservation, Reservation, ReservationId, SchedulingBackend, StudentId,
    TutoriaError, TutoringSession, TutoringSessionId,
};

/// Backend operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCall {
    ListSessions,
    ListActiveWindows,
    WindowsForSession,
    CreateReservation,
    CancelReservation,
    StudentReservations,
}

/// A `SchedulingBackend` backed by in-memory collections.
///
/// Queued failures are returned FIFO per operation before any data is
/// touched. Successful reservations consume one place of their window.
pub struct MockBackend {
    sessions: Mutex<Vec<TutoringSession>>,
    windows: Mutex<Vec<AvailabilityWindow>>,
    reservations: Mutex<Vec<Reservation>>,
    requests: Mutex<Vec<NewReservation>>,
    failures: Mutex<HashMap<BackendCall, VecDeque<TutoriaError>>>,
    fetch_delay: Mutex<Option<Duration>>,
    next_id: AtomicI64,
}

impl MockBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::with_data(Vec::new(), Vec::new())
    }

    /// Create a backend pre-loaded with sessions and windows.
    pub fn with_data(sessions: Vec<TutoringSession>, windows: Vec<AvailabilityWindow>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            windows: Mutex::new(windows),
            reservations: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            fetch_delay: Mutex::new(None),
            next_id: AtomicI64::new(1),
        }
    }

    /// Make the next call of `call` fail with `error`.
    pub async fn fail_next(&self, call: BackendCall, error: TutoriaError) {
        self.failures
            .lock()
            .await
            .entry(call)
            .or_default()
            .push_back(error);
    }

    /// Delay both list fetches by `delay`.
    pub async fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.lock().await = Some(delay);
    }

    pub async fn set_sessions(&self, sessions: Vec<TutoringSession>) {
        *self.sessions.lock().await = sessions;
    }

    pub async fn set_windows(&self, windows: Vec<AvailabilityWindow>) {
        *self.windows.lock().await = windows;
    }

    /// Reservation requests received so far, accepted or not.
    pub async fn requests(&self) -> Vec<NewReservation> {
        self.requests.lock().await.clone()
    }

    /// Reservations currently stored.
    pub async fn reservations(&self) -> Vec<Reservation> {
        self.reservations.lock().await.clone()
    }

    async fn injected(&self, call: BackendCall) -> Result<(), TutoriaError> {
        match self
            .failures
            .lock()
            .await
            .get_mut(&call)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn delay(&self) {
        let delay = *self.fetch_delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchedulingBackend for MockBackend {
    async fn list_sessions(&self) -> Result<Vec<TutoringSession>, TutoriaError> {
        self.delay().await;
        self.injected(BackendCall::ListSessions).await?;
        Ok(self.sessions.lock().await.clone())
    }

    async fn list_active_windows(&self) -> Result<Vec<AvailabilityWindow>, TutoriaError> {
        self.delay().await;
        self.injected(BackendCall::ListActiveWindows).await?;
        Ok(self.windows.lock().await.clone())
    }

    async fn windows_for_session(
        &self,
        session: TutoringSessionId,
    ) -> Result<Vec<AvailabilityWindow>, TutoriaError> {
        self.injected(BackendCall::WindowsForSession).await?;
        Ok(self
            .windows
            .lock()
            .await
            .iter()
            .filter(|w| w.tutoring_session_id == session)
            .cloned()
            .collect())
    }

    async fn create_reservation(
        &self,
        request: &NewReservation,
    ) -> Result<Reservation, TutoriaError> {
        self.requests.lock().await.push(request.clone());
        self.injected(BackendCall::CreateReservation).await?;

        let mut windows = self.windows.lock().await;
        if let Some(window) = windows
            .iter_mut()
            .find(|w| w.id == request.availability_window_id)
        {
            window.capacity_used += 1;
        }

        let reservation = Reservation {
            id: ReservationId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            availability_window_id: request.availability_window_id,
            student_id: request.student_id,
            state_id: 1,
            state_name: Some("Reservada".to_string()),
            notes: request.notes.clone(),
            start_time: request.start_time,
            end_time: request.end_time,
            created_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            session_name: None,
            tutor_name: None,
            modality: Some(request.modality),
            location: None,
        };
        self.reservations.lock().await.push(reservation.clone());
        Ok(reservation)
    }

    async fn cancel_reservation(
        &self,
        id: ReservationId,
        reason: &str,
    ) -> Result<Reservation, TutoriaError> {
        self.injected(BackendCall::CancelReservation).await?;
        let mut reservations = self.reservations.lock().await;
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| TutoriaError::NotFound {
                entity: "reservation",
                id: id.to_string(),
            })?;
        reservation.state_id = 3;
        reservation.state_name = Some("Cancelada".to_string());
        reservation.cancellation_reason = Some(reason.to_string());
        Ok(reservation.clone())
    }

    async fn student_reservations(
        &self,
        student: StudentId,
    ) -> Result<Vec<Reservation>, TutoriaError> {
        self.injected(BackendCall::StudentReservations).await?;
        Ok(self
            .reservations
            .lock()
            .await
            .iter()
            .filter(|r| r.student_id == student)
            .cloned()
            .collect())
    }
}
