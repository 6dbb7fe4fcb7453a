// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP Basic authentication against the credential store.

use crate::db::{with_timeout, CredentialStore};
use crate::error::AppError;
use crate::services::password::PasswordHasher;
use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Username/password pair taken from an `Authorization: Basic` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Extract credentials from request headers.
    ///
    /// Returns `None` when the header is absent, uses another scheme, or
    /// does not decode to `username:password`.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = BASE64.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Authenticated caller attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

/// Checks credentials against stored password digests.
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    timeout: Duration,
}

impl Authenticator {
    pub fn new(users: Arc<dyn CredentialStore>, hasher: PasswordHasher, timeout: Duration) -> Self {
        Self {
            users,
            hasher,
            timeout,
        }
    }

    /// Resolve credentials to an identity.
    ///
    /// Missing credentials are rejected without touching the store. Store
    /// failures surface as errors, never as a rejection.
    pub async fn authenticate(
        &self,
        credentials: Option<Credentials>,
    ) -> Result<Identity, AppError> {
        let Some(credentials) = credentials else {
            tracing::debug!("Request carried no Basic credentials");
            return Err(AppError::Unauthenticated);
        };

        let user = with_timeout(
            self.timeout,
            "find_user_by_name",
            self.users.find_user_by_name(&credentials.username),
        )
        .await?;

        let Some(user) = user else {
            tracing::warn!(username = %credentials.username, "Authentication failed: unknown user");
            return Err(AppError::Unauthenticated);
        };

        let verified = self
            .hasher
            .verify_blocking(credentials.password, user.password_digest)
            .await?;
        if !verified {
            tracing::warn!(username = %credentials.username, "Authentication failed: bad password");
            return Err(AppError::Unauthenticated);
        }

        Ok(Identity {
            username: user.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDb;
    use axum::http::HeaderValue;
    use std::num::NonZeroU32;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(user_pass: &str) -> HeaderMap {
        headers_with(&format!("Basic {}", BASE64.encode(user_pass)))
    }

    #[test]
    fn test_parse_basic_header() {
        let creds = Credentials::from_headers(&basic("ryankim:12341234")).unwrap();
        assert_eq!(creds.username, "ryankim");
        assert_eq!(creds.password, "12341234");
    }

    #[test]
    fn test_password_may_contain_colons() {
        let creds = Credentials::from_headers(&basic("ryankim:a:b:c")).unwrap();
        assert_eq!(creds.password, "a:b:c");
    }

    #[test]
    fn test_parse_rejects_bad_headers() {
        assert!(Credentials::from_headers(&HeaderMap::new()).is_none());
        assert!(Credentials::from_headers(&headers_with("Bearer abc.def.ghi")).is_none());
        assert!(Credentials::from_headers(&headers_with("Basic !!!notbase64")).is_none());
        assert!(Credentials::from_headers(&basic("no-colon-here")).is_none());
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::from_headers(&basic("ryankim:12341234")).unwrap();
        assert!(!format!("{:?}", creds).contains("12341234"));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = Arc::new(MemoryDb::new());
        let hasher = PasswordHasher::new(NonZeroU32::new(1_000).unwrap());
        db.insert_user("ryankim", &hasher.hash("12341234").unwrap())
            .await
            .unwrap();
        let auth = Authenticator::new(db, hasher, Duration::from_secs(1));

        let identity = auth
            .authenticate(Credentials::from_headers(&basic("ryankim:12341234")))
            .await
            .unwrap();
        assert_eq!(identity.username, "ryankim");

        for attempt in [
            None,
            Credentials::from_headers(&basic("ryankim:wrong")),
            Credentials::from_headers(&basic("nobody:12341234")),
        ] {
            let err = auth.authenticate(attempt).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthenticated));
        }
    }
}
