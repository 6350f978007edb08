//! Command handlers for the `artsearch` binary
//!
//! Handlers return rendered output instead of printing so the binary stays a
//! thin argument parser.

use crate::api::ServiceState;
use crate::config::{page_size_from_env, SearchConfig};
use crate::error::Result;
use crate::filter::FilterSpec;
use crate::pipeline::{plan_offline, SearchPipeline, SearchRequest};
use crate::query::QueryDocument;
use serde::Serialize;
use tracing::{error, info};

/// What `compile` prints.
#[derive(Debug, Serialize)]
pub struct CompiledSearch {
    pub filters: FilterSpec,
    pub document: QueryDocument,
}

/// Resolve configuration for the server, degrading to a misconfigured state
/// instead of refusing to start.
pub fn service_state_from_env() -> ServiceState {
    match SearchConfig::from_env().and_then(SearchPipeline::from_config) {
        Ok(pipeline) => {
            info!(page_size = pipeline.page_size(), "Search pipeline ready");
            ServiceState::Ready(pipeline)
        }
        Err(e) => {
            error!(error = %e, "Search pipeline unavailable, searches will fail");
            ServiceState::Misconfigured(e.to_string())
        }
    }
}

/// Run one search and render the canonical result as pretty JSON.
pub async fn handle_search(query: String, after: Option<String>) -> Result<String> {
    let request = SearchRequest::new(query, after)?;
    let pipeline = SearchPipeline::from_config(SearchConfig::from_env()?)?;

    let results = pipeline.search(&request).await?;
    Ok(render(&results))
}

/// Show the filters and query a search would send, without calling the catalog.
pub async fn handle_compile(query: String, after: Option<String>, offline: bool) -> Result<String> {
    let request = SearchRequest::new(query, after)?;

    let (filters, document) = if offline {
        plan_offline(&request, page_size_from_env()?)
    } else {
        let pipeline = SearchPipeline::from_config(SearchConfig::from_env()?)?;
        pipeline.plan(&request).await
    };

    Ok(render(&CompiledSearch { filters, document }))
}

fn render<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
