//! Registration and sign-in endpoints

use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use auth_service_shared::types::{RegisterRequest, SignInRequest, SignInResponse, UserResponse};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user =
        UserService::register(&state.db, &req.email, req.name.as_deref(), &req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Sign in with email and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Json<SignInResponse>> {
    let response =
        UserService::sign_in(&state.db, state.tokens(), &req.email, &req.password).await?;
    Ok(Json(response))
}
