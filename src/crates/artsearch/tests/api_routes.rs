//! Router tests driven through `tower::ServiceExt::oneshot`

mod common;

use artsearch::api::{create_router, ServiceState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{catalog_page, pipeline, MockChatModel};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn post_search(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Router over a pipeline whose catalog nobody should reach.
fn unreachable_catalog_app(model: Arc<MockChatModel>) -> Router {
    create_router(ServiceState::Ready(pipeline(model, "http://127.0.0.1:9/v2")))
}

#[tokio::test]
async fn test_empty_query_rejected_without_calls() {
    let model = Arc::new(MockChatModel::with_args(json!({ "keyword": "x" })));

    let (status, body) = post_search(unreachable_catalog_app(model.clone()), json!({ "query": "" }).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("query"));
    assert_eq!(model.get_call_count(), 0);
}

#[tokio::test]
async fn test_wrong_types_rejected_without_calls() {
    let model = Arc::new(MockChatModel::with_args(json!({ "keyword": "x" })));

    for payload in [
        json!({}),
        json!({ "query": 12 }),
        json!({ "query": "   " }),
        json!({ "query": "monet", "after": 5 }),
        json!(["monet"]),
    ] {
        let (status, body) = post_search(unreachable_catalog_app(model.clone()), payload.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert!(body["error"].is_string());
    }

    assert_eq!(model.get_call_count(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let model = Arc::new(MockChatModel::with_args(json!({ "keyword": "x" })));

    let (status, body) = post_search(unreachable_catalog_app(model.clone()), "{\"query\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(model.get_call_count(), 0);
}

#[tokio::test]
async fn test_successful_search() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_page("abc123")))
        .mount(&server)
        .await;

    let model = Arc::new(MockChatModel::with_args(json!({ "artistIDs": ["pablo-picasso"] })));
    let app = create_router(ServiceState::Ready(pipeline(model, &server.uri())));

    let (status, body) = post_search(app, json!({ "query": "picasso", "after": null }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let connection = &body["artworksConnection"];
    assert_eq!(connection["edges"][0]["node"]["internalID"], "5f1e");
    assert_eq!(connection["pageInfo"], json!({ "hasNextPage": true, "endCursor": "abc123" }));
}

#[tokio::test]
async fn test_upstream_failure_is_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let model = Arc::new(MockChatModel::with_args(json!({ "medium": "painting" })));
    let app = create_router(ServiceState::Ready(pipeline(model.clone(), &server.uri())));

    let (status, body) = post_search(app, json!({ "query": "paintings" }).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("500"));
    assert_eq!(model.get_call_count(), 1);
}

#[tokio::test]
async fn test_misconfigured_service() {
    let app = create_router(ServiceState::Misconfigured(
        "Configuration error: missing required environment variables: ARTSY_USER_ID".into(),
    ));

    let (status, body) = post_search(app.clone(), json!({ "query": "rothko" }).to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("ARTSY_USER_ID"));

    let (status, _) = post_search(app.clone(), json!({ "query": "" }).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health["status"], "misconfigured");
}

#[tokio::test]
async fn test_health_ok() {
    let model = Arc::new(MockChatModel::with_args(json!({})));
    let app = unreachable_catalog_app(model);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
