// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip Planner API Server
//!
//! Serves user registration and per-user trip management behind HTTP
//! Basic authentication.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_planner::{
    config::{Config, StoreBackend},
    db::{CredentialStore, FirestoreDb, MemoryDb, TripStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        store = config.store_backend.as_str(),
        enforce_trip_ownership = config.enforce_trip_ownership,
        "Starting Trip Planner API"
    );

    let (user_store, trip_store): (Arc<dyn CredentialStore>, Arc<dyn TripStore>) =
        match config.store_backend {
            StoreBackend::Firestore => {
                let db = Arc::new(FirestoreDb::new(&config.gcp_project_id).await?);
                let users: Arc<dyn CredentialStore> = db.clone();
                let trips: Arc<dyn TripStore> = db;
                (users, trips)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data will not survive a restart");
                let db = Arc::new(MemoryDb::new());
                let users: Arc<dyn CredentialStore> = db.clone();
                let trips: Arc<dyn TripStore> = db;
                (users, trips)
            }
        };

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), user_store, trip_store));

    // Build router
    let app = trip_planner::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trip_planner=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
