//! Bearer-token extraction for protected routes
//!
//! The `AuthUser` extractor validates the Authorization header against the
//! process-wide token service and hands the handler the token's subject.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;
use uuid::Uuid;

/// Authenticated caller extracted from a bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("invalid authorization format".to_string()))?;

        // Expired and invalid stay distinct in the log; the caller sees a
        // uniform rejection either way.
        let claims = app_state.tokens().validate(token).map_err(|e| {
            debug!("Token rejected: {}", e);
            ApiError::Unauthorized("invalid or expired token".to_string())
        })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("invalid subject in token".to_string()))?;

        Ok(AuthUser { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_user_is_debuggable() {
        let user = AuthUser {
            user_id: Uuid::new_v4(),
        };
        assert!(format!("{:?}", user).contains("AuthUser"));
    }
}
