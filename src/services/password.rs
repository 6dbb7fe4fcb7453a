// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Salted one-way password digests (PBKDF2-HMAC-SHA256).
//!
//! Digest format: `pbkdf2-sha256$<iterations>$<salt b64>$<hash b64>`.
//! The iteration count travels with the digest, so raising it later does
//! not invalidate existing users.

use crate::error::AppError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Hashes new passwords and verifies candidates against stored digests.
#[derive(Clone)]
pub struct PasswordHasher {
    iterations: NonZeroU32,
    rng: SystemRandom,
}

impl PasswordHasher {
    pub fn new(iterations: NonZeroU32) -> Self {
        Self {
            iterations,
            rng: SystemRandom::new(),
        }
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng
            .fill(&mut salt)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;

        let mut hash = [0u8; HASH_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            self.iterations,
            &salt,
            password.as_bytes(),
            &mut hash,
        );

        Ok(format!(
            "{}${}${}${}",
            SCHEME,
            self.iterations,
            BASE64.encode(salt),
            BASE64.encode(hash)
        ))
    }

    /// Constant-time check of `password` against `digest`.
    ///
    /// A digest that does not parse never verifies.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let Some((iterations, salt, expected)) = parse_digest(digest) else {
            tracing::warn!("Stored password digest is malformed");
            return false;
        };

        pbkdf2::verify(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            &salt,
            password.as_bytes(),
            &expected,
        )
        .is_ok()
    }

    /// [`hash`](Self::hash) on the blocking pool, off the async workers.
    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {e}")))?
    }

    /// [`verify`](Self::verify) on the blocking pool, off the async workers.
    pub async fn verify_blocking(
        &self,
        password: String,
        digest: String,
    ) -> Result<bool, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verify task failed: {e}")))
    }
}

fn parse_digest(digest: &str) -> Option<(NonZeroU32, Vec<u8>, Vec<u8>)> {
    let mut parts = digest.split('$');
    if parts.next()? != SCHEME {
        return None;
    }
    let iterations: NonZeroU32 = parts.next()?.parse().ok()?;
    let salt = BASE64.decode(parts.next()?).ok()?;
    let hash = BASE64.decode(parts.next()?).ok()?;
    if parts.next().is_some() || hash.len() != HASH_LEN {
        return None;
    }
    Some((iterations, salt, hash))
}
