// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: store contracts and their implementations.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{DocumentId, Trip, TripPayload, UserRecord};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TRIPS: &str = "trips";
}

/// Holds user records and their password digests.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by login name.
    async fn find_user_by_name(&self, name: &str) -> Result<Option<UserRecord>, AppError>;

    async fn get_user(&self, id: &DocumentId) -> Result<Option<UserRecord>, AppError>;

    /// Persist a new user; the store assigns the id.
    async fn insert_user(&self, name: &str, password_digest: &str)
        -> Result<UserRecord, AppError>;
}

/// Holds trip records.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Persist a new trip owned by `owner`; the store assigns the id.
    async fn insert_trip(&self, owner: &str, payload: TripPayload) -> Result<Trip, AppError>;

    async fn get_trip(&self, id: &DocumentId) -> Result<Option<Trip>, AppError>;

    async fn find_trips_by_owner(&self, owner: &str) -> Result<Vec<Trip>, AppError>;

    /// Merge `patch` into the stored trip. A missing id is a no-op.
    async fn update_trip(&self, id: &DocumentId, patch: &TripPayload) -> Result<(), AppError>;

    /// Remove a trip. A missing id is a no-op.
    async fn delete_trip(&self, id: &DocumentId) -> Result<(), AppError>;
}

/// Run one store call under a deadline, surfacing expiry as `Timeout`.
pub async fn with_timeout<T, F>(
    limit: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Store call exceeded deadline"
            );
            Err(AppError::Timeout(operation))
        }
    }
}
