// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST client for the tutoring backend.
//!
//! This crate implements [`SchedulingBackend`] over HTTP. It forwards the
//! bearer credential of the attached [`SessionContext`] and classifies
//! reservation rejections; all business rules stay on the server.

pub mod classify;
pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use tutoria_config::TutoriaConfig;
use tutoria_core::{
    AvailabilityWindow, CancelReservation, NewReservation, Reservation, ReservationId,
    SchedulingBackend, SessionContext, StudentId, TutoriaError, TutoringSession,
    TutoringSessionId,
};

use crate::classify::classify_reservation_failure;
use crate::client::{ApiFailure, RestClient};
use crate::types::{LoginRequest, LoginResponse};

/// [`SchedulingBackend`] backed by the tutoring REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: RestClient,
    session: Option<SessionContext>,
}

impl HttpBackend {
    /// Creates a backend from configuration.
    ///
    /// When `backend.token` is set, the backend starts with a session built
    /// from it and `app.student_id` (or student 0 if none is configured).
    pub fn new(config: &TutoriaConfig) -> Result<Self, TutoriaError> {
        let client = RestClient::new(
            &config.backend.base_url,
            Duration::from_secs(config.backend.timeout_secs),
            config.backend.max_retries,
        )?;

        let session = config.backend.token.as_ref().map(|token| {
            SessionContext::from_secret(
                token.clone(),
                String::new(),
                config.app.student_id.unwrap_or(StudentId(0)),
            )
        });

        info!(base_url = %client.base_url(), authenticated = session.is_some(), "backend client initialized");

        Ok(Self { client, session })
    }

    /// Attaches a logged-in session; its token is sent with every request.
    pub fn set_session(&mut self, session: SessionContext) {
        self.session = Some(session);
    }

    /// Drops the attached session (logout).
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    /// Exchanges credentials for a [`SessionContext`].
    ///
    /// Does not attach the session; call [`HttpBackend::set_session`].
    pub async fn login(&self, code: &str, password: &str) -> Result<SessionContext, TutoriaError> {
        let request = LoginRequest { code, password };
        let response: LoginResponse = self
            .client
            .post_json("/auth/login", &request, None)
            .await?
            .map_err(|failure| match failure.status.as_u16() {
                400 | 401 | 403 => TutoriaError::Unauthenticated,
                _ => failure.into_error(),
            })?;
        info!(code = %response.code, "logged in");
        Ok(SessionContext::new(
            response.token,
            response.code,
            response.user_id,
        ))
    }

    fn reservation_error(failure: ApiFailure) -> TutoriaError {
        if failure.status.as_u16() == 401 {
            return TutoriaError::Unauthenticated;
        }
        let message = failure.message.unwrap_or_default();
        let kind = classify_reservation_failure(failure.status.as_u16(), &message);
        warn!(status = %failure.status, kind = %kind, message = %message, "reservation rejected");
        TutoriaError::Reservation { kind, message }
    }
}

#[async_trait]
impl SchedulingBackend for HttpBackend {
    async fn list_sessions(&self) -> Result<Vec<TutoringSession>, TutoriaError> {
        let sessions: Vec<TutoringSession> = self
            .client
            .get_json("/tutoring-sessions", self.session.as_ref())
            .await?;
        debug!(count = sessions.len(), "tutoring sessions fetched");
        Ok(sessions)
    }

    async fn list_active_windows(&self) -> Result<Vec<AvailabilityWindow>, TutoriaError> {
        let windows: Vec<AvailabilityWindow> = self
            .client
            .get_json("/availability-windows?active=true", self.session.as_ref())
            .await?;
        debug!(count = windows.len(), "active availability windows fetched");
        Ok(windows)
    }

    async fn windows_for_session(
        &self,
        session: TutoringSessionId,
    ) -> Result<Vec<AvailabilityWindow>, TutoriaError> {
        let path = format!("/availability-windows/by-session/{session}");
        let windows: Vec<AvailabilityWindow> =
            self.client.get_json(&path, self.session.as_ref()).await?;
        debug!(session = %session, count = windows.len(), "session windows fetched");
        Ok(windows)
    }

    async fn create_reservation(
        &self,
        request: &NewReservation,
    ) -> Result<Reservation, TutoriaError> {
        let reservation: Reservation = self
            .client
            .post_json("/reservations", request, self.session.as_ref())
            .await?
            .map_err(Self::reservation_error)?;
        info!(
            reservation = %reservation.id,
            window = %reservation.availability_window_id,
            "reservation created"
        );
        Ok(reservation)
    }

    async fn cancel_reservation(
        &self,
        id: ReservationId,
        reason: &str,
    ) -> Result<Reservation, TutoriaError> {
        let path = format!("/reservations/{id}/cancel");
        let body = CancelReservation {
            reason: reason.to_string(),
        };
        let reservation: Reservation = self
            .client
            .post_json(&path, &body, self.session.as_ref())
            .await?
            .map_err(|failure| match failure.status.as_u16() {
                404 => TutoriaError::NotFound {
                    entity: "reservation",
                    id: id.to_string(),
                },
                _ => Self::reservation_error(failure),
            })?;
        info!(reservation = %id, "reservation cancelled");
        Ok(reservation)
    }

    async fn student_reservations(
        &self,
        student: StudentId,
    ) -> Result<Vec<Reservation>, TutoriaError> {
        let path = format!("/reservations/by-student/{student}");
        let reservations: Vec<Reservation> =
            self.client.get_json(&path, self.session.as_ref()).await?;
        debug!(student = %student, count = reservations.len(), "student reservations fetched");
        Ok(reservations)
    }
}
