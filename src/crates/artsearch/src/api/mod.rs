//! REST API layer
//!
//! - `POST /api/search` runs one search
//! - `GET /health` reports whether searches can run

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::{create_router, AppState, ServiceState};
