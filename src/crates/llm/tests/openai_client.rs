//! HTTP-level tests for OpenAiClient against a mock completions endpoint.

use llm::remote::OpenAiClient;
use llm::{ChatModel, ChatRequest, LlmError, Message, RemoteLlmConfig, ToolChoice, ToolDefinition};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    let config = RemoteLlmConfig::new("test-key", server.uri(), "gpt-4o-mini");
    OpenAiClient::new(config).unwrap()
}

fn lookup_request() -> ChatRequest {
    ChatRequest::new(vec![Message::user("find ada")])
        .with_tools(vec![ToolDefinition::new("lookup", "Find a record")
            .with_parameters(json!({"type": "object", "properties": {"name": {"type": "string"}}}))])
        .with_tool_choice(ToolChoice::function("lookup"))
}

#[tokio::test]
async fn test_tool_call_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "tool_choice": { "type": "function", "function": { "name": "lookup" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "lookup", "arguments": "{\"name\":\"ada\"}" }
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).chat(lookup_request()).await.unwrap();

    let call = response.tool_call("lookup").expect("tool call");
    assert_eq!(call.arguments["name"], "ada");
    assert_eq!(response.usage.map(|u| u.total()), Some(49));
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = client_for(&server).chat(lookup_request()).await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_server_error_maps_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server).chat(lookup_request()).await.unwrap_err();
    match err {
        LlmError::ProviderError(msg) => assert!(msg.contains("overloaded")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).chat(lookup_request()).await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}
