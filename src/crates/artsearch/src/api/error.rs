//! API error types and HTTP response conversion
//!
//! Every failure leaves the service as a JSON `{ "error": "..." }` body.
//! Input problems are 400; everything else is 500.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SearchError;

/// API error response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was rejected before any external call
    #[error("{message}")]
    BadRequest { kind: &'static str, message: String },

    /// Configuration or upstream failure
    #[error("{message}")]
    InternalError { kind: &'static str, message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Failure classification carried into the log line.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest { kind, .. } | ApiError::InternalError { kind, .. } => *kind,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind();
        let body = ApiErrorResponse {
            error: self.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), kind, error = %body.error, "Search failed");
        } else {
            tracing::warn!(status = status.as_u16(), kind, error = %body.error, "Search rejected");
        }

        (status, Json(body)).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        if err.is_client_error() {
            ApiError::BadRequest { kind, message }
        } else {
            ApiError::InternalError { kind, message }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            kind: "input_validation",
            message: format!("Invalid input: {}", rejection.body_text()),
        }
    }
}
