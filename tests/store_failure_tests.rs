// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store failures must surface as 5xx, never as "not found" or a rejection.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use trip_planner::config::Config;
use trip_planner::db::{CredentialStore, FirestoreDb, MemoryDb, TripStore};
use trip_planner::error::AppError;
use trip_planner::models::{DocumentId, Trip, TripPayload};
use trip_planner::routes::create_router;
use trip_planner::AppState;

mod common;
use common::{register, send};

/// Trip store whose every call hangs.
struct StalledTrips;

#[async_trait]
impl TripStore for StalledTrips {
    async fn insert_trip(&self, _owner: &str, _payload: TripPayload) -> Result<Trip, AppError> {
        std::future::pending().await
    }

    async fn get_trip(&self, _id: &DocumentId) -> Result<Option<Trip>, AppError> {
        std::future::pending().await
    }

    async fn find_trips_by_owner(&self, _owner: &str) -> Result<Vec<Trip>, AppError> {
        std::future::pending().await
    }

    async fn update_trip(&self, _id: &DocumentId, _patch: &TripPayload) -> Result<(), AppError> {
        std::future::pending().await
    }

    async fn delete_trip(&self, _id: &DocumentId) -> Result<(), AppError> {
        std::future::pending().await
    }
}

/// Trip store that acknowledges deletes without removing anything.
#[derive(Default)]
struct StickyTrips {
    inner: MemoryDb,
}

#[async_trait]
impl TripStore for StickyTrips {
    async fn insert_trip(&self, owner: &str, payload: TripPayload) -> Result<Trip, AppError> {
        self.inner.insert_trip(owner, payload).await
    }

    async fn get_trip(&self, id: &DocumentId) -> Result<Option<Trip>, AppError> {
        self.inner.get_trip(id).await
    }

    async fn find_trips_by_owner(&self, owner: &str) -> Result<Vec<Trip>, AppError> {
        self.inner.find_trips_by_owner(owner).await
    }

    async fn update_trip(&self, id: &DocumentId, patch: &TripPayload) -> Result<(), AppError> {
        self.inner.update_trip(id, patch).await
    }

    async fn delete_trip(&self, _id: &DocumentId) -> Result<(), AppError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_stalled_store_times_out_with_504() {
    let config = Config {
        store_timeout: Duration::from_millis(50),
        ..Config::test_default()
    };
    let users = Arc::new(MemoryDb::new());
    let state = Arc::new(AppState::new(config, users, Arc::new(StalledTrips)));
    let app = create_router(state);
    let auth = register(&app, "ryankim", "12341234").await;

    let (status, body) = send(&app, "GET", "/trips/", Some(&auth), None).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, json!({ "error": "store_timeout" }));

    let (status, _) = send(
        &app,
        "GET",
        "/trips/55f0cbb4236f44b7f0e3cb23",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_offline_store_is_500_not_404() {
    let db = Arc::new(FirestoreDb::new_mock());
    let users = Arc::new(MemoryDb::new());
    let state = Arc::new(AppState::new(Config::test_default(), users, db));
    let app = create_router(state);
    let auth = register(&app, "ryankim", "12341234").await;

    let (status, body) = send(
        &app,
        "GET",
        "/trips/55f0cbb4236f44b7f0e3cb23",
        Some(&auth),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "database_error" }));
}

#[tokio::test]
async fn test_credential_store_failure_is_500_not_401() {
    let db: Arc<dyn CredentialStore> = Arc::new(FirestoreDb::new_mock());
    let trips = Arc::new(MemoryDb::new());
    let state = Arc::new(AppState::new(Config::test_default(), db, trips));
    let app = create_router(state);

    let (status, _) = send(
        &app,
        "GET",
        "/trips/",
        Some(&common::basic_auth("ryankim", "12341234")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_delete_that_does_not_take_is_404() {
    let users = Arc::new(MemoryDb::new());
    let trips = Arc::new(StickyTrips::default());
    let state = Arc::new(AppState::new(Config::test_default(), users, trips.clone()));
    let app = create_router(state);
    let auth = register(&app, "ryankim", "12341234").await;

    let (status, created) = send(
        &app,
        "POST",
        "/trips/",
        Some(&auth),
        Some(json!({ "name": "Coast", "waypoints": ["Monterey"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "DELETE", &format!("/trips/{id}"), Some(&auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "data": [] }));

    // The record is untouched and still served.
    let id = DocumentId::parse(&id).unwrap();
    assert!(trips.get_trip(&id).await.unwrap().is_some());
}
