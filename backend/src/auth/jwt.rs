//! Token issuance and validation
//!
//! Bearer tokens are HS256-signed JWTs carrying the identity claims
//! `{sub, email, name}`. Keys are derived once from the configured secret
//! and shared read-only by every concurrent request.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Identity claims carried by an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Why a token was rejected. Expired and invalid are kept distinct for
/// diagnostics; callers see a single unauthorized outcome either way.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token signing failed")]
    Sign(#[source] jsonwebtoken::errors::Error),
}

/// A freshly signed token and its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Pre-computed signing keys, derived once at startup
#[derive(Clone)]
struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token service: issues and validates identity tokens.
///
/// Construct once at startup and store in AppState; cloning is cheap.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the signing secret and default lifetime.
    ///
    /// The algorithm is pinned to HS256: tokens claiming any other
    /// algorithm fail validation. Zero leeway, so `now >= exp` is expired.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys: TokenKeys::new(secret),
            validation,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Issue a token for a user with the default lifetime
    #[inline]
    pub fn issue(
        &self,
        subject: Uuid,
        email: &str,
        name: Option<&str>,
    ) -> Result<IssuedToken, TokenError> {
        self.issue_with_ttl(subject, email, name, self.ttl)
    }

    /// Issue a token with an explicit lifetime
    pub fn issue_with_ttl(
        &self,
        subject: Uuid,
        email: &str,
        name: Option<&str>,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            name: name.map(str::to_string),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(TokenError::Sign)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token: signature, algorithm, then expiry.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e),
            })
    }

    /// Default token lifetime in seconds (surfaced as `expires_in`)
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }
}
