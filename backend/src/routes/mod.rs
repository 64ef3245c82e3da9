//! HTTP surface of the auth service
//!
//! Routes deliver validated requests to the flows and relay their results
//! and error kinds back as responses.

use crate::state::AppState;
use axum::http::{header, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod users;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use users::user_routes;

/// Bound on every request, store calls included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the application router with all transport middleware applied
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(health::health_routes())
        .nest("/api/v1", api_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Auth Service API v1" }))
        .nest("/auth", auth::auth_routes())
        .nest("/users", users::user_routes())
}
