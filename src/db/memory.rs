// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store backed by concurrent maps.
//!
//! Each document lives under its own map shard lock, so single-document
//! reads and writes are atomic. Used for local runs and tests.

use crate::db::{CredentialStore, TripStore};
use crate::error::AppError;
use crate::models::{DocumentId, Trip, TripPayload, UserRecord};
use crate::time_utils::now_rfc3339;
use async_trait::async_trait;
use dashmap::DashMap;
use ring::rand::SystemRandom;
use std::sync::Arc;

/// In-memory database.
#[derive(Clone)]
pub struct MemoryDb {
    users: Arc<DashMap<DocumentId, UserRecord>>,
    trips: Arc<DashMap<DocumentId, Trip>>,
    rng: SystemRandom,
}

impl Default for MemoryDb {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDb {
    pub fn new() -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            trips: Arc::new(DashMap::new()),
            rng: SystemRandom::new(),
        }
    }

    /// Number of stored trips.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryDb {
    async fn find_user_by_name(&self, name: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().name == name)
            .map(|entry| entry.value().clone()))
    }

    async fn get_user(&self, id: &DocumentId) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert_user(
        &self,
        name: &str,
        password_digest: &str,
    ) -> Result<UserRecord, AppError> {
        let record = UserRecord {
            id: DocumentId::generate(&self.rng)?,
            name: name.to_string(),
            password_digest: password_digest.to_string(),
            created_at: now_rfc3339(),
        };
        self.users.insert(record.id.clone(), record.clone());
        Ok(record)
    }
}

#[async_trait]
impl TripStore for MemoryDb {
    async fn insert_trip(&self, owner: &str, payload: TripPayload) -> Result<Trip, AppError> {
        let trip = Trip::new(DocumentId::generate(&self.rng)?, owner, payload);
        self.trips.insert(trip.id.clone(), trip.clone());
        Ok(trip)
    }

    async fn get_trip(&self, id: &DocumentId) -> Result<Option<Trip>, AppError> {
        Ok(self.trips.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_trips_by_owner(&self, owner: &str) -> Result<Vec<Trip>, AppError> {
        let mut trips: Vec<Trip> = self
            .trips
            .iter()
            .filter(|entry| entry.value().owner == owner)
            .map(|entry| entry.value().clone())
            .collect();
        trips.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(trips)
    }

    async fn update_trip(&self, id: &DocumentId, patch: &TripPayload) -> Result<(), AppError> {
        if let Some(mut trip) = self.trips.get_mut(id) {
            trip.merge(patch);
        }
        Ok(())
    }

    async fn delete_trip(&self, id: &DocumentId) -> Result<(), AppError> {
        self.trips.remove(id);
        Ok(())
    }
}
