//! Health check endpoint handler

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::routes::{AppState, ServiceState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Handler for GET /health
///
/// 200 with `ok` when searches can run, 503 with `misconfigured` otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.service.as_ref() {
        ServiceState::Ready(_) => (StatusCode::OK, Json(HealthResponse::new("ok"))),
        ServiceState::Misconfigured(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::new("misconfigured")),
        ),
    }
}
