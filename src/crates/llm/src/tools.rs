//! Function-calling abstractions.
//!
//! A request binds one or more [`ToolDefinition`]s; the model answers with
//! [`ToolCall`]s naming a tool and carrying JSON arguments that matched (or
//! were supposed to match) the declared parameter schema.
//!
//! ```rust,ignore
//! use llm::{ChatRequest, Message, ToolChoice, ToolDefinition};
//! use serde_json::json;
//!
//! let lookup = ToolDefinition::new("lookup", "Find a record by name")
//!     .with_parameters(json!({
//!         "type": "object",
//!         "properties": { "name": { "type": "string" } },
//!         "required": ["name"]
//!     }));
//!
//! let request = ChatRequest::new(vec![Message::user("find ada")])
//!     .with_tools(vec![lookup])
//!     .with_tool_choice(ToolChoice::function("lookup"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Definition of a tool/function that a model can call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name within the request's tool list.
    pub name: String,

    /// What the tool does; the model uses this to decide when to call it.
    pub description: String,

    /// JSON Schema object describing the parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<JsonValue>,
}

impl ToolDefinition {
    /// Create a new tool definition with name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
        }
    }

    /// Add a JSON Schema for the tool's parameters.
    pub fn with_parameters(mut self, parameters: JsonValue) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// A request from the model to call a specific tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned identifier for this call.
    pub id: String,

    /// Name of the tool, expected to match a bound `ToolDefinition`.
    pub name: String,

    /// Decoded arguments. Not validated against the schema.
    pub arguments: JsonValue,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: JsonValue) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// How the model may use the bound tools.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToolChoice {
    /// The model decides whether to call a tool.
    #[default]
    Auto,
    /// The model must not call tools.
    None,
    /// The model must call some tool.
    Required,
    /// The model must call the named tool.
    Function(String),
}

impl ToolChoice {
    /// Force a call to the named tool.
    pub fn function(name: impl Into<String>) -> Self {
        ToolChoice::Function(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_builder() {
        let tool = ToolDefinition::new("test_tool", "A test tool")
            .with_parameters(json!({"type": "object"}));

        assert_eq!(tool.name, "test_tool");
        assert_eq!(tool.description, "A test tool");
        assert!(tool.parameters.is_some());
    }

    #[test]
    fn test_tool_call() {
        let call = ToolCall::new("call_1", "lookup", json!({"name": "ada"}));

        assert_eq!(call.id, "call_1");
        assert_eq!(call.name, "lookup");
        assert_eq!(call.arguments["name"], "ada");
    }

    #[test]
    fn test_tool_choice_default_is_auto() {
        assert_eq!(ToolChoice::default(), ToolChoice::Auto);
        assert_eq!(
            ToolChoice::function("lookup"),
            ToolChoice::Function("lookup".to_string())
        );
    }
}
