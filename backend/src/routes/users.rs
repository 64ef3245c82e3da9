//! Authenticated user lookup

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use auth_service_shared::types::UserResponse;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/:id", get(get_user))
}

/// Fetch a user record by id
///
/// GET /api/v1/users/{id}
///
/// Requires a bearer token whose subject equals `{id}`.
async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::get_user(&state.db, auth_user.user_id, id).await?;
    Ok(Json(user))
}
