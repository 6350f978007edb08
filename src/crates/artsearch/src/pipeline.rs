//! Request-scoped search pipeline
//!
//! One search runs extraction, sanitizing, compilation and the catalog call
//! strictly in sequence. [`SearchPipeline`] holds only immutable clients and
//! settings, so a single instance serves concurrent requests.

use crate::catalog::{CatalogClient, SearchResults};
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::extract::IntentExtractor;
use crate::filter::FilterSpec;
use crate::query::{PageRequest, QueryBuilder, QueryDocument};
use crate::sanitize::sanitize;
use llm::remote::OpenAiClient;
use serde_json::Value;
use std::sync::Arc;
use tooling::logging::timed;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query text as the user typed it. Never blank.
    pub query: String,
    /// Cursor from a previous page.
    pub after: Option<String>,
}

impl SearchRequest {
    /// Validate a query and optional cursor. An empty cursor counts as none;
    /// any other cursor is kept byte for byte.
    pub fn new(query: impl Into<String>, after: Option<String>) -> Result<Self> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(SearchError::invalid_input("query must not be empty"));
        }

        Ok(Self {
            query,
            after: after.filter(|cursor| !cursor.is_empty()),
        })
    }

    /// Validate an inbound JSON body of the form `{ "query": ..., "after": ... }`.
    pub fn from_json(body: &Value) -> Result<Self> {
        let Value::Object(fields) = body else {
            return Err(SearchError::invalid_input("request body must be a JSON object"));
        };

        let query = match fields.get("query") {
            Some(Value::String(query)) => query.clone(),
            Some(_) => return Err(SearchError::invalid_input("query must be a string")),
            None => return Err(SearchError::invalid_input("query is required")),
        };

        let after = match fields.get("after") {
            None | Some(Value::Null) => None,
            Some(Value::String(cursor)) => Some(cursor.clone()),
            Some(_) => return Err(SearchError::invalid_input("after must be a string")),
        };

        Self::new(query, after)
    }

    pub fn page(&self, size: u32) -> PageRequest {
        PageRequest {
            size,
            cursor: self.after.clone(),
        }
    }
}

/// Compile without consulting the model: the whole query becomes the keyword.
pub fn plan_offline(request: &SearchRequest, page_size: u32) -> (FilterSpec, QueryDocument) {
    let spec = FilterSpec::keyword(request.query.as_str());
    let document = QueryBuilder::compile(&spec, &request.page(page_size));
    (spec, document)
}

/// Composes the four search stages.
#[derive(Clone)]
pub struct SearchPipeline {
    extractor: IntentExtractor,
    catalog: CatalogClient,
    page_size: u32,
}

impl SearchPipeline {
    pub fn new(extractor: IntentExtractor, catalog: CatalogClient, page_size: u32) -> Self {
        Self {
            extractor,
            catalog,
            page_size,
        }
    }

    /// Build the pipeline with an OpenAI-compatible model.
    pub fn from_config(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let model = OpenAiClient::new(config.model)?;
        let extractor = IntentExtractor::new(Arc::new(model), config.extract_timeout);
        let catalog = CatalogClient::new(config.catalog)?;

        Ok(Self::new(extractor, catalog, config.page_size))
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Extract, sanitize and compile, without calling the catalog.
    pub async fn plan(&self, request: &SearchRequest) -> (FilterSpec, QueryDocument) {
        let extraction = self.extractor.extract(&request.query).await;
        let spec = sanitize(extraction, &request.query);
        let document = QueryBuilder::compile(&spec, &request.page(self.page_size));
        (spec, document)
    }

    /// Run a full search.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        let span = info_span!("search", request_id = %Uuid::new_v4());

        timed("search", async {
            let (spec, document) = self.plan(request).await;
            info!(
                filters = %serde_json::to_string(&spec).unwrap_or_default(),
                cursor = request.after.is_some(),
                "Compiled search"
            );

            let results = self.catalog.execute(&document).await?;
            info!(
                edges = results.artworks_connection.edges.len(),
                has_next_page = results.artworks_connection.page_info.has_next_page,
                "Search completed"
            );
            Ok::<_, SearchError>(results)
        })
        .instrument(span)
        .await
    }
}
