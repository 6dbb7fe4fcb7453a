// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip CRUD on behalf of authenticated callers.
//!
//! Collection reads are scoped to the caller. Single-trip get, update and
//! delete resolve by id alone unless ownership enforcement is switched on,
//! in which case a non-owner gets `Forbidden`.

use crate::db::{with_timeout, TripStore};
use crate::error::AppError;
use crate::models::{DocumentId, Trip, TripPayload};
use crate::services::auth::Identity;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct TripService {
    store: Arc<dyn TripStore>,
    timeout: Duration,
    enforce_ownership: bool,
}

impl TripService {
    pub fn new(store: Arc<dyn TripStore>, timeout: Duration, enforce_ownership: bool) -> Self {
        Self {
            store,
            timeout,
            enforce_ownership,
        }
    }

    /// Create a trip owned by the caller, whatever the payload says.
    pub async fn create(
        &self,
        payload: TripPayload,
        identity: &Identity,
    ) -> Result<Trip, AppError> {
        let trip = with_timeout(
            self.timeout,
            "insert_trip",
            self.store.insert_trip(&identity.username, payload.sanitized()),
        )
        .await?;

        tracing::info!(trip_id = %trip.id, owner = %trip.owner, "Trip created");
        Ok(trip)
    }

    /// All trips owned by the caller; empty when there are none.
    pub async fn list(&self, identity: &Identity) -> Result<Vec<Trip>, AppError> {
        let trips = with_timeout(
            self.timeout,
            "find_trips_by_owner",
            self.store.find_trips_by_owner(&identity.username),
        )
        .await?;

        tracing::debug!(owner = %identity.username, count = trips.len(), "Listed trips");
        Ok(trips)
    }

    pub async fn get(&self, id: &DocumentId, identity: &Identity) -> Result<Trip, AppError> {
        let trip = self
            .fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip {} not found", id)))?;

        self.check_owner(&trip, identity)?;
        Ok(trip)
    }

    /// Merge `patch` into the trip and return the stored result.
    ///
    /// A missing id is a no-op yielding `None`.
    pub async fn update(
        &self,
        id: &DocumentId,
        patch: TripPayload,
        identity: &Identity,
    ) -> Result<Option<Trip>, AppError> {
        if self.enforce_ownership {
            match self.fetch(id).await? {
                Some(trip) => self.check_owner(&trip, identity)?,
                None => return Ok(None),
            }
        }

        let patch = patch.sanitized();
        with_timeout(self.timeout, "update_trip", self.store.update_trip(id, &patch)).await?;

        let updated = self.fetch(id).await?;
        tracing::info!(
            trip_id = %id,
            caller = %identity.username,
            found = updated.is_some(),
            "Trip updated"
        );
        Ok(updated)
    }

    /// Delete a trip and return what was there before.
    ///
    /// If the trip is still readable afterwards the delete did not take and
    /// the result is `NotFound`.
    pub async fn delete(
        &self,
        id: &DocumentId,
        identity: &Identity,
    ) -> Result<Option<Trip>, AppError> {
        let before = self.fetch(id).await?;
        if let Some(trip) = &before {
            self.check_owner(trip, identity)?;
        }

        with_timeout(self.timeout, "delete_trip", self.store.delete_trip(id)).await?;

        if self.fetch(id).await?.is_some() {
            tracing::warn!(trip_id = %id, "Trip still present after delete");
            return Err(AppError::NotFound(format!("Trip {} was not deleted", id)));
        }

        tracing::info!(
            trip_id = %id,
            caller = %identity.username,
            existed = before.is_some(),
            "Trip deleted"
        );
        Ok(before)
    }

    async fn fetch(&self, id: &DocumentId) -> Result<Option<Trip>, AppError> {
        with_timeout(self.timeout, "get_trip", self.store.get_trip(id)).await
    }

    fn check_owner(&self, trip: &Trip, identity: &Identity) -> Result<(), AppError> {
        if self.enforce_ownership && trip.owner != identity.username {
            return Err(AppError::Forbidden(format!(
                "{} does not own trip {}",
                identity.username, trip.id
            )));
        }
        Ok(())
    }
}
