// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth;
pub mod password;
pub mod trips;
pub mod users;

pub use auth::{Authenticator, Credentials, Identity};
pub use password::PasswordHasher;
pub use trips::TripService;
pub use users::UserService;
