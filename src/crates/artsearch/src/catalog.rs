//! Catalog client and response normalization
//!
//! Executes compiled queries against the catalog's GraphQL endpoint and
//! reduces whatever comes back to a [`SearchResults`]. Transport failures
//! and reported query errors end the request. A response that is merely
//! missing the connection (or parts of it) is treated as an empty page.

use crate::config::CatalogConfig;
use crate::error::{Result, SearchError};
use crate::query::QueryDocument;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;
use tooling::async_utils::timeout::{with_deadline, TimeoutError};
use tooling::logging::truncate_for_logging;
use tracing::{debug, error, warn};

const ACCESS_TOKEN_HEADER: &str = "X-ACCESS-TOKEN";
const USER_ID_HEADER: &str = "X-USER-ID";

/// Longest upstream body kept in errors and logs.
const MAX_BODY_DIAGNOSTIC_CHARS: usize = 500;

/// Canonical search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub artworks_connection: ArtworksConnection,
}

impl SearchResults {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworksConnection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<ArtworkEdge>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_info: PageInfo,
}

/// Relay page metadata. Both fields are always serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}

/// One `{ node { ... } }` edge, forwarded exactly as the catalog sent it.
pub type ArtworkEdge = Value;

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reduce a decoded catalog body to the canonical shape.
///
/// Fails only when the body reports query errors.
pub fn normalize(body: Value) -> Result<SearchResults> {
    if let Some(messages) = protocol_errors(&body) {
        return Err(SearchError::UpstreamProtocol(messages));
    }

    let Some(Value::Object(mut connection)) = body
        .pointer("/data/artworksConnection")
        .cloned()
    else {
        warn!("Response has no artworksConnection, returning empty page");
        return Ok(SearchResults::empty());
    };

    let edges = match connection.remove("edges") {
        Some(Value::Array(edges)) => edges,
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            warn!(found = %json_kind(&other), "Catalog edges are not a list, using no edges");
            Vec::new()
        }
    };
    let page_info = page_info_from(connection.remove("pageInfo"));

    Ok(SearchResults {
        artworks_connection: ArtworksConnection { edges, page_info },
    })
}

/// Read page metadata field by field; an off-shape field falls back alone.
fn page_info_from(value: Option<Value>) -> PageInfo {
    let fields = match value {
        Some(Value::Object(fields)) => fields,
        None | Some(Value::Null) => return PageInfo::default(),
        Some(other) => {
            warn!(found = %json_kind(&other), "Catalog pageInfo is not an object, using default");
            return PageInfo::default();
        }
    };

    let has_next_page = match fields.get("hasNextPage") {
        Some(Value::Bool(flag)) => *flag,
        None | Some(Value::Null) => false,
        Some(other) => {
            warn!(found = %json_kind(other), "Unexpected hasNextPage in catalog response");
            false
        }
    };

    let end_cursor = match fields.get("endCursor") {
        Some(Value::String(cursor)) => Some(cursor.clone()),
        None | Some(Value::Null) => None,
        Some(other) => {
            warn!(found = %json_kind(other), "Unexpected endCursor in catalog response");
            None
        }
    };

    PageInfo {
        has_next_page,
        end_cursor,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn protocol_errors(body: &Value) -> Option<Vec<String>> {
    let messages: Vec<String> = match body.get("errors")? {
        Value::Null => return None,
        Value::Array(errors) => errors.iter().map(error_message).collect(),
        other => vec![error_message(other)],
    };

    if messages.is_empty() {
        None
    } else {
        Some(messages)
    }
}

fn error_message(error: &Value) -> String {
    match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => error.to_string(),
    }
}

/// HTTP client for the catalog endpoint.
#[derive(Clone)]
pub struct CatalogClient {
    config: CatalogConfig,
    client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Execute a compiled query and normalize the response.
    pub async fn execute(&self, document: &QueryDocument) -> Result<SearchResults> {
        debug!(
            endpoint = %self.config.endpoint,
            cursor = document.cursor().is_some(),
            "Querying catalog"
        );

        let body = match with_deadline("catalog_query", self.config.timeout, self.fetch(document)).await {
            Ok(body) => body,
            Err(TimeoutError::OperationFailed(e)) => return Err(e),
            Err(TimeoutError::Timeout(after)) => return Err(timed_out(after)),
        };

        normalize(body)
    }

    async fn fetch(&self, document: &QueryDocument) -> Result<Value> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .header(USER_ID_HEADER, &self.config.user_id)
            .json(document)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let detail = truncate_for_logging(&text, MAX_BODY_DIAGNOSTIC_CHARS);
            error!(status = status.as_u16(), body = %detail, "Catalog request failed");
            return Err(SearchError::transport(Some(status.as_u16()), detail));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(
                body = %truncate_for_logging(&text, MAX_BODY_DIAGNOSTIC_CHARS),
                "Catalog response is not JSON"
            );
            SearchError::transport(Some(status.as_u16()), format!("response body is not JSON: {}", e))
        })
    }
}

fn transport_error(e: reqwest::Error) -> SearchError {
    error!(error = %e, timeout = e.is_timeout(), "Catalog request failed");
    SearchError::transport(e.status().map(|s| s.as_u16()), e.to_string())
}

fn timed_out(after: Duration) -> SearchError {
    error!(?after, "Catalog request timed out");
    SearchError::transport(None, format!("catalog request timed out after {:?}", after))
}
