// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

/// Which store implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process maps; data is lost on restart.
    Memory,
    /// Google Cloud Firestore (or its emulator).
    Firestore,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Firestore => "firestore",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "firestore" => Ok(StoreBackend::Firestore),
            other => Err(ConfigError::Invalid("STORE_BACKEND", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Store implementation
    pub store_backend: StoreBackend,
    /// GCP project ID (Firestore backend only)
    pub gcp_project_id: String,
    /// Deadline applied to every individual store call
    pub store_timeout: Duration,
    /// PBKDF2 iteration count for new password digests
    pub password_hash_iterations: NonZeroU32,
    /// Reject single-trip reads and writes by anyone but the owner (403)
    pub enforce_trip_ownership: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => StoreBackend::Memory,
        };

        let gcp_project_id = env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string());
        if store_backend == StoreBackend::Firestore && gcp_project_id.trim().is_empty() {
            return Err(ConfigError::Missing("GCP_PROJECT_ID"));
        }

        let iterations: u32 = parse_var("PASSWORD_HASH_ITERATIONS", 100_000)?;
        let password_hash_iterations = NonZeroU32::new(iterations).ok_or_else(|| {
            ConfigError::Invalid("PASSWORD_HASH_ITERATIONS", iterations.to_string())
        })?;

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            store_backend,
            gcp_project_id,
            store_timeout: Duration::from_millis(parse_var("STORE_TIMEOUT_MS", 5_000)?),
            password_hash_iterations,
            enforce_trip_ownership: parse_var("ENFORCE_TRIP_OWNERSHIP", false)?,
        })
    }

    /// Fast in-memory configuration for tests.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            store_backend: StoreBackend::Memory,
            gcp_project_id: "test-project".to_string(),
            store_timeout: Duration::from_secs(5),
            password_hash_iterations: NonZeroU32::MIN.saturating_add(999),
            enforce_trip_ownership: false,
        }
    }
}

/// Read and parse an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
