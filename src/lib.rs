// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip Planner: users and their trips behind HTTP Basic authentication.
//!
//! This crate provides the backend API for registering users and managing
//! the trips (named, ordered lists of waypoints) they own.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{CredentialStore, TripStore};
use services::{Authenticator, PasswordHasher, TripService, UserService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub authenticator: Authenticator,
    pub users: UserService,
    pub trips: TripService,
}

impl AppState {
    /// Wire services to the given stores.
    pub fn new(
        config: Config,
        user_store: Arc<dyn CredentialStore>,
        trip_store: Arc<dyn TripStore>,
    ) -> Self {
        let hasher = PasswordHasher::new(config.password_hash_iterations);
        let timeout = config.store_timeout;

        Self {
            authenticator: Authenticator::new(user_store.clone(), hasher.clone(), timeout),
            users: UserService::new(user_store, hasher, timeout),
            trips: TripService::new(trip_store, timeout, config.enforce_trip_ownership),
            config,
        }
    }
}
