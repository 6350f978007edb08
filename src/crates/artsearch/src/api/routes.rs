//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::{error::ApiError, handlers};
use crate::pipeline::SearchPipeline;

/// What the server can do with a search request.
pub enum ServiceState {
    Ready(SearchPipeline),
    /// Configuration failed at startup; searches answer 500 with this message.
    Misconfigured(String),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ServiceState>,
}

impl AppState {
    pub fn new(service: ServiceState) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn pipeline(&self) -> Result<&SearchPipeline, ApiError> {
        match self.service.as_ref() {
            ServiceState::Ready(pipeline) => Ok(pipeline),
            ServiceState::Misconfigured(reason) => Err(ApiError::InternalError {
                kind: "configuration",
                message: reason.clone(),
            }),
        }
    }
}

/// Build the complete API router
pub fn create_router(service: ServiceState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/search", post(handlers::search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(service))
}
