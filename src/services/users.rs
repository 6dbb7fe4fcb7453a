// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration and lookup.

use crate::db::{with_timeout, CredentialStore};
use crate::error::AppError;
use crate::models::{DocumentId, NewUser, UserView};
use crate::services::auth::Identity;
use crate::services::password::PasswordHasher;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    timeout: Duration,
}

impl UserService {
    pub fn new(store: Arc<dyn CredentialStore>, hasher: PasswordHasher, timeout: Duration) -> Self {
        Self {
            store,
            hasher,
            timeout,
        }
    }

    /// Register a user. Names are unique; the password is stored only as a digest.
    pub async fn create(&self, payload: NewUser) -> Result<UserView, AppError> {
        payload
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = with_timeout(
            self.timeout,
            "find_user_by_name",
            self.store.find_user_by_name(&payload.name),
        )
        .await?;
        if existing.is_some() {
            tracing::info!(name = %payload.name, "Registration rejected: name taken");
            return Err(AppError::Conflict(payload.name));
        }

        let digest = self.hasher.hash_blocking(payload.password).await?;
        let record = with_timeout(
            self.timeout,
            "insert_user",
            self.store.insert_user(&payload.name, &digest),
        )
        .await?;

        tracing::info!(user_id = %record.id, name = %record.name, "User created");
        Ok(record.into())
    }

    /// Fetch a user by id on behalf of an authenticated caller.
    pub async fn get(&self, id: &DocumentId, identity: &Identity) -> Result<UserView, AppError> {
        tracing::debug!(user_id = %id, caller = %identity.username, "Fetching user");

        with_timeout(self.timeout, "get_user", self.store.get_user(id))
            .await?
            .map(UserView::from)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}
