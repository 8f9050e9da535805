// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar view controller.
//!
//! [`CalendarView`] holds one student's calendar screen: the fetched
//! collections, the grid built from them, the tutor filter and the selected
//! cell. Loads fetch both collections concurrently and tolerate either fetch
//! failing. Every load starts a new generation; a load that finishes after
//! a newer one began is discarded. Filter changes only rebuild the grid, so a
//! load still in flight lands under whatever filter is current.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use tutoria_core::{
    AvailabilityWindow, Modality, NewReservation, Reservation, SchedulingBackend, SessionContext,
    TutorId, TutoriaError, TutoringSession, WindowId,
};

use crate::grid::{AvailabilityGrid, CellView, GridKey, build_grid};
use crate::search::{Suggestion, search_sessions};
use crate::slots::{ReservationSlot, slots_for_window};

/// Which fetches of the last applied load failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Degraded {
    pub sessions: bool,
    pub windows: bool,
}

impl Degraded {
    pub fn any(&self) -> bool {
        self.sessions || self.windows
    }
}

/// Result of [`CalendarView::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched data replaced the view's state.
    Applied(Degraded),
    /// A newer load started meanwhile; the data was dropped.
    Stale,
}

/// What the student has selected for booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// One entry of a grid cell.
    Cell { key: GridKey, entry: usize },
    /// A loaded window the grid does not show, picked by id.
    Window(WindowId),
}

/// A reservation the backend did not accept.
///
/// `message` is ready to show to the student.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ReserveError {
    pub message: String,
    #[source]
    pub source: TutoriaError,
}

impl From<TutoriaError> for ReserveError {
    fn from(source: TutoriaError) -> Self {
        Self {
            message: source.user_message(),
            source,
        }
    }
}

#[derive(Debug, Default)]
struct ViewState {
    sessions: Vec<TutoringSession>,
    windows: Vec<AvailabilityWindow>,
    tutor_filter: Option<TutorId>,
    grid: AvailabilityGrid,
    degraded: Degraded,
    selection: Option<Selection>,
}

impl ViewState {
    fn rebuild(&mut self) {
        self.grid = build_grid(&self.windows, &self.sessions, self.tutor_filter);
        let still_valid = match self.selection {
            Some(Selection::Cell { key, entry }) => {
                self.grid.cell(&key).is_some_and(|cell| entry < cell.len())
            }
            Some(Selection::Window(id)) => self.windows.iter().any(|w| w.id == id),
            None => true,
        };
        if !still_valid {
            debug!(selection = ?self.selection, "selection no longer available, clearing");
            self.selection = None;
        }
    }

    fn selected_window(&self) -> Option<&AvailabilityWindow> {
        let id = match self.selection? {
            Selection::Cell { key, entry } => self.grid.cell(&key)?.entries().get(entry)?.window_id,
            Selection::Window(id) => id,
        };
        self.windows.iter().find(|w| w.id == id)
    }
}

/// Controller for one student's calendar.
pub struct CalendarView<B: SchedulingBackend> {
    backend: Arc<B>,
    session: SessionContext,
    generation: AtomicU64,
    state: RwLock<ViewState>,
}

impl<B: SchedulingBackend> CalendarView<B> {
    pub fn new(backend: Arc<B>, session: SessionContext) -> Self {
        Self {
            backend,
            session,
            generation: AtomicU64::new(0),
            state: RwLock::new(ViewState::default()),
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Fetches sessions and active windows concurrently and rebuilds the
    /// grid. A failed fetch is replaced by an empty list and reported in
    /// the returned [`Degraded`].
    pub async fn load(&self) -> LoadOutcome {
        let generation = self.next_generation();

        let (sessions, windows) = tokio::join!(
            self.backend.list_sessions(),
            self.backend.list_active_windows()
        );

        let mut degraded = Degraded::default();
        let sessions = sessions.unwrap_or_else(|e| {
            warn!(error = %e, "failed to fetch tutoring sessions");
            degraded.sessions = true;
            Vec::new()
        });
        let windows = windows.unwrap_or_else(|e| {
            warn!(error = %e, "failed to fetch availability windows");
            degraded.windows = true;
            Vec::new()
        });

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding stale calendar load");
            return LoadOutcome::Stale;
        }

        state.sessions = sessions;
        state.windows = windows;
        state.degraded = degraded;
        state.rebuild();
        info!(
            sessions = state.sessions.len(),
            windows = state.windows.len(),
            cells = state.grid.len(),
            degraded = degraded.any(),
            "calendar loaded"
        );
        LoadOutcome::Applied(degraded)
    }

    /// Restricts the grid to one tutor's sessions, or clears the filter.
    /// Rebuilds from the cached collections without fetching.
    pub async fn set_tutor_filter(&self, tutor: Option<TutorId>) {
        let mut state = self.state.write().await;
        state.tutor_filter = tutor;
        state.rebuild();
        debug!(tutor = ?tutor, cells = state.grid.len(), "tutor filter applied");
    }

    /// Selects the primary entry of the cell at `key`.
    pub async fn select_cell(&self, key: GridKey) -> Result<CellView, TutoriaError> {
        self.select_entry(key, 0).await
    }

    /// Selects one entry of a cell holding several windows.
    pub async fn select_entry(&self, key: GridKey, entry: usize) -> Result<CellView, TutoriaError> {
        let mut state = self.state.write().await;
        let view = state
            .grid
            .cell(&key)
            .and_then(|cell| cell.entries().get(entry))
            .cloned()
            .ok_or_else(|| TutoriaError::NotFound {
                entity: "grid cell",
                id: format!("{key} #{entry}"),
            })?;
        state.selection = Some(Selection::Cell { key, entry });
        Ok(view)
    }

    /// Selects `window` by id.
    ///
    /// A window shown in the grid selects its cell entry. A loaded window the
    /// grid leaves out (an off-band start, a weekend, another tutor under the
    /// filter) is selected directly so it can still be sliced and booked.
    pub async fn select_window(&self, window: WindowId) -> Result<CellView, TutoriaError> {
        let position = self.state.read().await.grid.position(window);
        if let Some((key, entry)) = position {
            return self.select_entry(key, entry).await;
        }

        let mut state = self.state.write().await;
        let record = state
            .windows
            .iter()
            .find(|w| w.id == window)
            .ok_or_else(|| TutoriaError::NotFound {
                entity: "availability window",
                id: window.to_string(),
            })?;
        let session = state
            .sessions
            .iter()
            .find(|s| s.id == record.tutoring_session_id)
            .ok_or_else(|| TutoriaError::NotFound {
                entity: "tutoring session",
                id: record.tutoring_session_id.to_string(),
            })?;
        let view = CellView::new(record, session);
        debug!(window = %window, "selected window outside the grid");
        state.selection = Some(Selection::Window(window));
        Ok(view)
    }

    pub async fn clear_selection(&self) {
        self.state.write().await.selection = None;
    }

    /// Bookable slots of the selected window, or `None` without a selection.
    pub async fn slots_for_selection(&self) -> Option<Vec<ReservationSlot>> {
        let state = self.state.read().await;
        state
            .selected_window()
            .map(|window| slots_for_window(window).collect())
    }

    /// Books `slot` in the selected window for the logged-in student.
    ///
    /// On success the selection is cleared. On failure the selection is
    /// kept, nothing is retried and the error carries a message for the
    /// student.
    pub async fn reserve(
        &self,
        slot: &ReservationSlot,
        notes: Option<String>,
        modality: Modality,
    ) -> Result<Reservation, ReserveError> {
        let request = {
            let state = self.state.read().await;
            let window = state.selected_window().ok_or_else(|| ReserveError {
                message: "Select a time slot first.".to_string(),
                source: TutoriaError::NotFound {
                    entity: "selection",
                    id: "none".to_string(),
                },
            })?;
            NewReservation {
                availability_window_id: window.id,
                student_id: self.session.user_id(),
                start_time: slot.start_time,
                end_time: slot.end_time,
                notes: notes.filter(|n| !n.trim().is_empty()),
                modality,
            }
        };

        match self.backend.create_reservation(&request).await {
            Ok(reservation) => {
                info!(
                    reservation = %reservation.id,
                    window = %request.availability_window_id,
                    slot = %slot.display_label,
                    "slot reserved"
                );
                self.clear_selection().await;
                Ok(reservation)
            }
            Err(e) => {
                warn!(
                    window = %request.availability_window_id,
                    slot = %slot.display_label,
                    error = %e,
                    "reservation failed"
                );
                Err(e.into())
            }
        }
    }

    /// Searches the cached sessions.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let state = self.state.read().await;
        search_sessions(query, &state.sessions, &state.windows, limit)
    }

    /// Snapshot of the current grid.
    pub async fn grid(&self) -> AvailabilityGrid {
        self.state.read().await.grid.clone()
    }

    pub async fn degraded(&self) -> Degraded {
        self.state.read().await.degraded
    }

    pub async fn selection(&self) -> Option<Selection> {
        self.state.read().await.selection
    }

    pub async fn tutor_filter(&self) -> Option<TutorId> {
        self.state.read().await.tutor_filter
    }

    /// The cached window with `id`, if the last load returned it.
    pub async fn window(&self, id: WindowId) -> Option<AvailabilityWindow> {
        let state = self.state.read().await;
        state.windows.iter().find(|w| w.id == id).cloned()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}
