//! Liveness and readiness surface
//!
//! `/health` and `/health/live` never touch the store. `/health/ready`
//! pings it and reports a degraded 503 when it is unreachable; the
//! process keeps serving either way.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/health/live", get(live))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreCheck>,
}

/// Result of the store ping
#[derive(Serialize)]
pub struct StoreCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn report(status: &str, store: Option<StoreCheck>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
    }
}

async fn health() -> Json<HealthResponse> {
    Json(report("healthy", None))
}

async fn live() -> Json<HealthResponse> {
    Json(report("alive", None))
}

async fn ready(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match db::health_check(&state.db).await {
        Ok(()) => {
            let check = StoreCheck {
                status: "healthy".to_string(),
                message: None,
            };
            Ok(Json(report("ready", Some(check))))
        }
        Err(e) => {
            let check = StoreCheck {
                status: "unhealthy".to_string(),
                message: Some(e.to_string()),
            };
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(report("not_ready", Some(check))),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_answers_without_store() {
        let response = health().await;
        assert_eq!(response.status, "healthy");
        assert!(response.store.is_none());
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn liveness_answers_alive() {
        let response = live().await;
        assert_eq!(response.status, "alive");
    }
}
