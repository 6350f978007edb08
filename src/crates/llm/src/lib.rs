//! Chat model client for artsearch.
//!
//! This crate provides the [`ChatModel`] trait, the request/response and
//! function-calling types that go with it, and a remote implementation for
//! OpenAI-compatible APIs.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::OpenAiClient;
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig, ToolChoice, ToolDefinition};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::new(
//!         std::env::var("OPENAI_API_KEY")?,
//!         "https://api.openai.com/v1",
//!         "gpt-4o-mini",
//!     );
//!     let client = OpenAiClient::new(config)?;
//!
//!     let tool = ToolDefinition::new("get_weather", "Current weather for a city")
//!         .with_parameters(json!({
//!             "type": "object",
//!             "properties": { "city": { "type": "string" } },
//!             "required": ["city"]
//!         }));
//!
//!     let request = ChatRequest::new(vec![Message::user("Weather in Oslo?")])
//!         .with_tools(vec![tool])
//!         .with_tool_choice(ToolChoice::function("get_weather"));
//!
//!     let response = client.chat(request).await?;
//!     if let Some(call) = response.tool_call("get_weather") {
//!         println!("city = {}", call.arguments["city"]);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod tools;

#[cfg(feature = "remote")]
pub mod remote;

pub use chat::{ChatModel, ChatRequest, ChatResponse, Message, Role, UsageMetadata};
pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use tools::{ToolCall, ToolChoice, ToolDefinition};
