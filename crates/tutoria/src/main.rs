// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tutoria - browse tutoring availability and book reservation slots.
//!
//! This is the binary entry point for the Tutoria command-line client.

mod booking;
mod calendar;
mod login;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tutoria_client::HttpBackend;
use tutoria_config::TutoriaConfig;
use tutoria_core::{Modality, ReservationId, TutorId, TutoriaError, WindowId};
use tutoria_schedule::CalendarView;

use crate::booking::ReserveRequest;

/// Tutoria - browse tutoring availability and book reservation slots.
#[derive(Parser, Debug)]
#[command(name = "tutoria", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the weekly availability grid.
    Grid {
        /// Only show sessions taught by this tutor.
        #[arg(long)]
        tutor: Option<i64>,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Search tutoring sessions by name, tutor or career.
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// List the bookable 15-minute slots of an availability window.
    Slots {
        window: i64,
        #[arg(long)]
        json: bool,
    },
    /// Reserve the slot of a window starting at HH:MM.
    Reserve {
        window: i64,
        start: String,
        /// Notes for the tutor.
        #[arg(long)]
        notes: Option<String>,
        /// Attend online instead of in person.
        #[arg(long = "virtual")]
        online: bool,
        #[arg(long)]
        json: bool,
    },
    /// Cancel one of your reservations.
    Cancel {
        reservation: i64,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        json: bool,
    },
    /// List your reservations.
    Reservations {
        #[arg(long)]
        json: bool,
    },
    /// Log in with your university code and print the session exports.
    Login {
        code: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => tutoria_config::load_and_validate_path(path),
        None => tutoria_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tutoria_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    if let Err(e) = run(cli, &config).await {
        tracing::debug!(error = %e, "command failed");
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &TutoriaConfig) -> Result<(), TutoriaError> {
    let backend = HttpBackend::new(config)?;
    let plain = cli.plain;

    if let Commands::Login { code, json } = &cli.command {
        return login::run_login(&backend, code, *json).await;
    }

    let session = backend
        .session()
        .cloned()
        .ok_or(TutoriaError::Unauthenticated)?;
    let backend = Arc::new(backend);
    let view = CalendarView::new(Arc::clone(&backend), session.clone());

    match cli.command {
        Commands::Grid { tutor, json } => {
            calendar::run_grid(&view, tutor.map(TutorId), json, plain).await
        }
        Commands::Search { query, json } => {
            calendar::run_search(&view, &query, config.calendar.max_suggestions, json, plain).await
        }
        Commands::Slots { window, json } => calendar::run_slots(&view, WindowId(window), json).await,
        Commands::Reserve {
            window,
            start,
            notes,
            online,
            json,
        } => {
            let modality = if online {
                Modality::Virtual
            } else {
                config.calendar.default_modality
            };
            let request = ReserveRequest {
                window: WindowId(window),
                start,
                notes,
                modality,
            };
            booking::run_reserve(&view, request, json, plain).await
        }
        Commands::Cancel {
            reservation,
            reason,
            json,
        } => {
            booking::run_cancel(
                backend.as_ref(),
                ReservationId(reservation),
                &reason,
                json,
                plain,
            )
            .await
        }
        Commands::Reservations { json } => {
            booking::run_reservations(backend.as_ref(), &session, json, plain).await
        }
        Commands::Login { .. } => Ok(()),
    }
}

/// Initialize the tracing subscriber; logs go to stderr so `--json` output
/// stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tutoria={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
