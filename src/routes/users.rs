// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use crate::error::{AppError, Result};
use crate::models::{DocumentId, NewUser, UserView};
use crate::services::Identity;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;

/// Registration is open to anyone.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/", post(create_user))
}

/// Lookup requires authentication; the auth layer is applied in routes/mod.rs.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/users/{id}", get(get_user))
}

/// Register a new user.
async fn create_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<NewUser>, AppError>,
) -> Result<Json<UserView>> {
    Ok(Json(state.users.create(payload).await?))
}

/// Get a user by id.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<UserView>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.users.get(&id, &identity).await?))
}
