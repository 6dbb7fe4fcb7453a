// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip routes. All of them require authentication; the auth layer is
//! applied in routes/mod.rs.

use crate::error::{AppError, Result};
use crate::models::{DocumentId, Trip, TripPayload};
use crate::services::Identity;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/", get(list_trips).post(create_trip))
        .route(
            "/trips/{id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
}

/// Create a trip owned by the caller.
async fn create_trip(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    WithRejection(Json(payload), _): WithRejection<Json<TripPayload>, AppError>,
) -> Result<Json<Trip>> {
    Ok(Json(state.trips.create(payload, &identity).await?))
}

/// List the caller's trips.
async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Trip>>> {
    Ok(Json(state.trips.list(&identity).await?))
}

async fn get_trip(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<Trip>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.trips.get(&id, &identity).await?))
}

/// Merge the payload into a trip. Responds `null` if the trip does not exist.
async fn update_trip(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    WithRejection(Json(patch), _): WithRejection<Json<TripPayload>, AppError>,
) -> Result<Json<Option<Trip>>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.trips.update(&id, patch, &identity).await?))
}

/// Delete a trip, echoing the removed record.
async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = DocumentId::parse(&id)?;
    let response = match state.trips.delete(&id, &identity).await? {
        Some(trip) => Json(trip).into_response(),
        None => Json(json!({ "data": [] })).into_response(),
    };
    Ok(response)
}
