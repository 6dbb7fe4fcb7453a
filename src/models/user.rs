// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use crate::models::DocumentId;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// User record stored in the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned id (also used as document ID)
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Login name, unique across users
    pub name: String,
    /// Salted password digest; never leaves the server
    pub password_digest: String,
    /// When the user was created (RFC 3339)
    pub created_at: String,
}

/// Registration payload.
#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserView {
    #[serde(rename = "_id")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: DocumentId,
    pub name: String,
    pub created_at: String,
}

impl From<UserRecord> for UserView {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            created_at: record.created_at,
        }
    }
}
