//! Shared fixtures for artsearch integration tests

#![allow(dead_code)]

use artsearch::catalog::CatalogClient;
use artsearch::config::CatalogConfig;
use artsearch::extract::{IntentExtractor, SEARCH_TOOL_NAME};
use artsearch::SearchPipeline;
use async_trait::async_trait;
use llm::{ChatModel, ChatRequest, ChatResponse, LlmError, Role, ToolCall};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_TOKEN: &str = "test-access-token";
pub const TEST_USER: &str = "test-user-id";
pub const PAGE_SIZE: u32 = 20;

/// Mock chat model that replays one outcome and counts calls.
pub struct MockChatModel {
    reply: Result<ChatResponse, String>,
    per_query: Vec<(String, Value)>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatModel {
    /// Model that calls the search tool with `arguments`.
    pub fn with_args(arguments: Value) -> Self {
        Self::replying(ChatResponse::with_tool_calls(vec![ToolCall::new(
            "call_1",
            SEARCH_TOOL_NAME,
            arguments,
        )]))
    }

    pub fn replying(reply: ChatResponse) -> Self {
        Self {
            reply: Ok(reply),
            per_query: Vec::new(),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            per_query: Vec::new(),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Model that picks tool arguments by the user's query text, answering
    /// after a short pause so concurrent calls overlap.
    pub fn per_query(replies: Vec<(&str, Value)>) -> Self {
        Self {
            reply: Err("no reply for this query".into()),
            per_query: replies
                .into_iter()
                .map(|(query, arguments)| (query.to_string(), arguments))
                .collect(),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn chat(&self, request: ChatRequest) -> llm::Result<ChatResponse> {
        *self.call_count.lock().unwrap() += 1;

        let query = request
            .messages
            .iter()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.clone());
        let routed = query.and_then(|query| {
            self.per_query
                .iter()
                .find(|(known, _)| *known == query)
                .map(|(_, arguments)| arguments.clone())
        });

        if let Some(arguments) = routed {
            tokio::time::sleep(Duration::from_millis(20)).await;
            return Ok(ChatResponse::with_tool_calls(vec![ToolCall::new(
                "call_1",
                SEARCH_TOOL_NAME,
                arguments,
            )]));
        }

        self.reply.clone().map_err(LlmError::ProviderError)
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Pipeline wired to `model` and a catalog at `endpoint`.
pub fn pipeline(model: Arc<MockChatModel>, endpoint: &str) -> SearchPipeline {
    let extractor = IntentExtractor::new(model, Duration::from_secs(5));
    let catalog = CatalogClient::new(
        CatalogConfig::new(endpoint, TEST_TOKEN, TEST_USER).with_timeout(Duration::from_secs(5)),
    )
    .unwrap();

    SearchPipeline::new(extractor, catalog, PAGE_SIZE)
}

/// A catalog body with one artwork and a next page.
pub fn catalog_page(end_cursor: &str) -> Value {
    json!({
        "data": {
            "artworksConnection": {
                "edges": [{
                    "node": {
                        "internalID": "5f1e",
                        "title": "Still Life with Red Apples",
                        "slug": "pablo-picasso-still-life-with-red-apples",
                        "date": "1938",
                        "medium": "Oil on canvas",
                        "artistNames": "Pablo Picasso",
                        "artists": [{ "name": "Pablo Picasso", "slug": "pablo-picasso" }],
                        "image": { "url": "https://images.test/large.jpg", "aspectRatio": 1.25 }
                    }
                }],
                "pageInfo": { "hasNextPage": true, "endCursor": end_cursor }
            }
        }
    })
}
