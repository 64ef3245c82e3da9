//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub password: String,
}

/// Sign-in request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Sign-in response: the bearer token plus the identity it asserts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub user: SessionUser,
}

/// Identity embedded in the sign-in response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Public projection of a stored user record.
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
