//! Error types for the search pipeline.
//!
//! Only failures that end a request live here. Recoverable model misbehavior
//! is not an error: it is [`crate::extract::Extraction::Failed`] and is
//! absorbed by the sanitizer. Upstream shape anomalies likewise never become
//! a `SearchError`.

use thiserror::Error;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Failures surfaced to the caller of a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request itself is unusable; no external call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Required credentials or settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The catalog could not be reached, answered with a non-success status,
    /// timed out, or sent a body that is not JSON.
    #[error("Catalog transport error ({}): {detail}", status_label(.status))]
    UpstreamTransport { status: Option<u16>, detail: String },

    /// The catalog answered successfully but reported query errors.
    #[error("Catalog returned errors: {}", .0.join("; "))]
    UpstreamProtocol(Vec<String>),
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no response".to_string(),
    }
}

impl SearchError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        SearchError::InvalidInput(msg.into())
    }

    pub fn transport(status: Option<u16>, detail: impl Into<String>) -> Self {
        SearchError::UpstreamTransport {
            status,
            detail: detail.into(),
        }
    }

    /// Whether the caller is at fault (as opposed to an internal failure).
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::InvalidInput(_))
    }

    /// Short classification used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::InvalidInput(_) => "input_validation",
            SearchError::Configuration(_) => "configuration",
            SearchError::UpstreamTransport { .. } => "upstream_transport",
            SearchError::UpstreamProtocol(_) => "upstream_protocol",
        }
    }
}

impl From<tooling::ToolingError> for SearchError {
    fn from(err: tooling::ToolingError) -> Self {
        SearchError::Configuration(err.to_string())
    }
}

impl From<llm::LlmError> for SearchError {
    fn from(err: llm::LlmError) -> Self {
        SearchError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let err = SearchError::transport(Some(500), "internal error");
        assert_eq!(err.to_string(), "Catalog transport error (status 500): internal error");

        let err = SearchError::transport(None, "connection refused");
        assert!(err.to_string().contains("no response"));
    }

    #[test]
    fn test_protocol_display_joins_messages() {
        let err = SearchError::UpstreamProtocol(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Catalog returned errors: a; b");
    }

    #[test]
    fn test_classification() {
        assert!(SearchError::invalid_input("empty").is_client_error());
        assert!(!SearchError::Configuration("x".into()).is_client_error());
        assert_eq!(SearchError::UpstreamProtocol(vec![]).kind(), "upstream_protocol");
    }

    #[test]
    fn test_tooling_error_becomes_configuration() {
        let err: SearchError = tooling::ToolingError::MissingEnv("ARTSY_USER_ID".into()).into();
        assert!(matches!(err, SearchError::Configuration(ref m) if m.contains("ARTSY_USER_ID")));
    }
}
