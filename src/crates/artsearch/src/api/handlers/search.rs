//! Search endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::api::{error::ApiResult, routes::AppState};
use crate::catalog::SearchResults;
use crate::pipeline::SearchRequest;

/// Handler for POST /api/search
///
/// The body is validated before configuration is consulted, so bad input is
/// a 400 even on a misconfigured server.
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SearchResults>> {
    let Json(body) = payload?;
    let request = SearchRequest::from_json(&body)?;

    let pipeline = state.pipeline()?;
    let results = pipeline.search(&request).await?;

    Ok(Json(results))
}
