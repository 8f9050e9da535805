// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tutoria integration tests.
//!
//! Provides an in-memory backend and record builders for fast,
//! deterministic tests without a running REST service.
//!
//! # Components
//!
//! - [`MockBackend`] - In-memory `SchedulingBackend` with failure injection
//! - [`fixtures`] - Builders for sessions and availability windows

pub mod fixtures;
pub mod mock_backend;

pub use mock_backend::{BackendCall, MockBackend};
