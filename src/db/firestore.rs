// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper implementing the store contracts.
//!
//! Provides typed operations for:
//! - Users (name + password digest)
//! - Trips (owner, route and pass-through fields)

use crate::db::{collections, CredentialStore, TripStore};
use crate::error::AppError;
use crate::models::{DocumentId, Trip, TripPayload, UserRecord};
use crate::time_utils::now_rfc3339;
use async_trait::async_trait;
use ring::rand::SystemRandom;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
    rng: SystemRandom,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any token; skip credential discovery entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            rng: SystemRandom::new(),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
            rng: SystemRandom::new(),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            client: None,
            rng: SystemRandom::new(),
        }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Replace a trip document wholesale.
    async fn put_trip(&self, trip: &Trip) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TRIPS)
            .document_id(trip.id.as_str())
            .object(trip)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

/// Prefix of the metadata fields the client adds to every document it reads.
const FIRESTORE_META_PREFIX: &str = "_firestore_";

/// Drop client metadata that `#[serde(flatten)]` would otherwise capture as
/// pass-through fields.
fn strip_metadata(mut trip: Trip) -> Trip {
    trip.extra.retain(|key, _| !key.starts_with(FIRESTORE_META_PREFIX));
    trip
}

// ─── User Operations ───

#[async_trait]
impl CredentialStore for FirestoreDb {
    async fn find_user_by_name(&self, name: &str) -> Result<Option<UserRecord>, AppError> {
        let mut users: Vec<UserRecord> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("name").eq(name)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(users.pop())
    }

    async fn get_user(&self, id: &DocumentId) -> Result<Option<UserRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(id.as_str())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
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

        let stored: UserRecord = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(record.id.as_str())
            .object(&record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user_id = %stored.id, "Stored user document");
        Ok(stored)
    }
}

// ─── Trip Operations ───

#[async_trait]
impl TripStore for FirestoreDb {
    async fn insert_trip(&self, owner: &str, payload: TripPayload) -> Result<Trip, AppError> {
        let trip = Trip::new(DocumentId::generate(&self.rng)?, owner, payload);

        let stored: Trip = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::TRIPS)
            .document_id(trip.id.as_str())
            .object(&trip)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(trip_id = %stored.id, "Stored trip document");
        Ok(strip_metadata(stored))
    }

    async fn get_trip(&self, id: &DocumentId) -> Result<Option<Trip>, AppError> {
        let trip: Option<Trip> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TRIPS)
            .obj()
            .one(id.as_str())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(trip.map(strip_metadata))
    }

    async fn find_trips_by_owner(&self, owner: &str) -> Result<Vec<Trip>, AppError> {
        let trips: Vec<Trip> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::TRIPS)
            .filter(|q| q.for_all([q.field("owner").eq(owner)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(trips.into_iter().map(strip_metadata).collect())
    }

    /// Read-merge-write. Firestore has no dynamic `$set`, so the merged
    /// document replaces the stored one.
    async fn update_trip(&self, id: &DocumentId, patch: &TripPayload) -> Result<(), AppError> {
        let Some(mut trip) = self.get_trip(id).await? else {
            tracing::debug!(trip_id = %id, "Update of missing trip ignored");
            return Ok(());
        };

        trip.merge(patch);
        self.put_trip(&trip).await
    }

    async fn delete_trip(&self, id: &DocumentId) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TRIPS)
            .document_id(id.as_str())
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
