// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store-assigned document identifiers.
//!
//! Ids are 12 random bytes rendered as 24 lowercase hex characters, the same
//! shape clients already know from document databases.

use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use std::fmt;

const ID_BYTES: usize = 12;
const ID_LEN: usize = ID_BYTES * 2;

/// Opaque, immutable document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh random id.
    pub fn generate(rng: &SystemRandom) -> Result<Self, AppError> {
        let mut bytes = [0u8; ID_BYTES];
        rng.fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
        Ok(Self(hex::encode(bytes)))
    }

    /// Validate an id taken from a request path.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.len() != ID_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AppError::Validation(format!("Malformed id: {:?}", raw)));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
