// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Basic authentication middleware.

use crate::error::AppError;
use crate::services::Credentials;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires valid Basic credentials.
///
/// On success the caller's [`Identity`](crate::services::Identity) is
/// inserted as a request extension. On failure the request never reaches
/// the handler.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = Credentials::from_headers(request.headers());
    let identity = state.authenticator.authenticate(credentials).await?;

    tracing::debug!(username = %identity.username, "Request authenticated");
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
