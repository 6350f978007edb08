//! Intent extraction through model function calling
//!
//! The model is given one tool whose parameters are the catalog filters and
//! is forced to call it. Whatever comes back is classified into an
//! [`Extraction`]: either raw arguments for the sanitizer, or a failure
//! reason. Extraction never returns an error to its caller.

use crate::filter::{FieldKind, FilterField};
use llm::{ChatModel, ChatRequest, ChatResponse, Message, ToolChoice, ToolDefinition};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tooling::async_utils::timeout::{with_deadline, TimeoutError};

/// Name of the single tool offered to the model.
pub const SEARCH_TOOL_NAME: &str = "search_artworks";

const SYSTEM_PROMPT: &str = "You translate requests for artwork into catalog search filters. \
Always call the search_artworks tool. Use artist slugs for artistIDs (for example \
\"pablo-picasso\", \"andy-warhol\"). Only fill fields the request actually mentions; \
put remaining descriptive words in keyword.";

/// Arguments as the model produced them. Unvalidated.
pub type ExtractedArgs = Map<String, Value>;

/// Outcome of one extraction attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Args(ExtractedArgs),
    Failed(ExtractionFailure),
}

/// Why the model's answer was unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("model call failed: {0}")]
    ModelError(String),

    #[error("model did not call a tool")]
    NoToolCall,

    #[error("model called unexpected tool '{0}'")]
    UnexpectedTool(String),

    #[error("tool arguments were not a JSON object")]
    MalformedArguments,

    #[error("model call exceeded {0:?}")]
    TimedOut(Duration),
}

/// The tool schema offered to the model.
///
/// Built fresh for each request.
pub fn search_tool() -> ToolDefinition {
    let properties: Map<String, Value> = FilterField::ALL
        .iter()
        .map(|field| (field.as_str().to_string(), field_schema(*field)))
        .collect();

    ToolDefinition::new(
        SEARCH_TOOL_NAME,
        "Search the artwork catalog using structured filters derived from the user's request.",
    )
    .with_parameters(json!({
        "type": "object",
        "properties": properties,
        "required": [FilterField::Keyword.as_str()],
    }))
}

fn field_schema(field: FilterField) -> Value {
    let description = match field {
        FilterField::Keyword => "Free-text search terms describing the artwork",
        FilterField::ArtistIds => "Artist slugs, lowercase and hyphenated, e.g. \"pablo-picasso\"",
        FilterField::Medium => "Medium, e.g. \"painting\", \"photography\", \"sculpture\", \"prints\"",
        FilterField::Color => "Dominant color, e.g. \"red\", \"blue\", \"black-and-white\"",
        FilterField::PartnerIds => "Gallery or partner slugs",
        FilterField::ForSale => "Only artworks currently for sale",
        FilterField::AttributionClass => {
            "Rarity: \"unique\", \"limited edition\", \"open edition\", \"unknown edition\""
        }
        FilterField::PriceRange => "Price range in USD as \"min-max\", or \"*-max\" for an upper bound only",
    };

    match field.kind() {
        FieldKind::Text => json!({ "type": "string", "description": description }),
        FieldKind::Flag => json!({ "type": "boolean", "description": description }),
        FieldKind::List => json!({
            "type": "array",
            "items": { "type": "string" },
            "description": description,
        }),
    }
}

/// Turns query text into tool-call arguments using a chat model.
#[derive(Clone)]
pub struct IntentExtractor {
    model: Arc<dyn ChatModel>,
    timeout: Duration,
}

impl IntentExtractor {
    pub fn new(model: Arc<dyn ChatModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Ask the model for search arguments.
    ///
    /// Errors, timeouts and unusable answers all come back as
    /// `Extraction::Failed`.
    pub async fn extract(&self, query: &str) -> Extraction {
        let request = ChatRequest::new(vec![Message::system(SYSTEM_PROMPT), Message::user(query)])
            .with_temperature(0.0)
            .with_tools(vec![search_tool()])
            .with_tool_choice(ToolChoice::function(SEARCH_TOOL_NAME));

        let outcome = match with_deadline("intent_extraction", self.timeout, self.model.chat(request)).await {
            Ok(response) => interpret(response),
            Err(TimeoutError::Timeout(after)) => Extraction::Failed(ExtractionFailure::TimedOut(after)),
            Err(TimeoutError::OperationFailed(e)) => {
                if e.is_auth_error() {
                    tracing::error!(model = self.model.model_name(), "Model provider rejected the API key");
                }
                Extraction::Failed(ExtractionFailure::ModelError(e.to_string()))
            }
        };

        match &outcome {
            Extraction::Args(args) => {
                tracing::debug!(model = self.model.model_name(), fields = args.len(), "Extracted search arguments");
            }
            Extraction::Failed(reason) => {
                tracing::warn!(model = self.model.model_name(), %reason, "Intent extraction failed");
            }
        }

        outcome
    }
}

/// Classify a model response.
pub fn interpret(response: ChatResponse) -> Extraction {
    let Some(first) = response.tool_calls.first() else {
        return Extraction::Failed(ExtractionFailure::NoToolCall);
    };

    let Some(call) = response.tool_call(SEARCH_TOOL_NAME) else {
        return Extraction::Failed(ExtractionFailure::UnexpectedTool(first.name.clone()));
    };

    match &call.arguments {
        Value::Object(args) => Extraction::Args(args.clone()),
        _ => Extraction::Failed(ExtractionFailure::MalformedArguments),
    }
}
