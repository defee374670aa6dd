//! API integration tests for the chat and history endpoints.
//!
//! Tests verify:
//! - Successful generation through `POST /api/chat`
//! - Validation errors (missing prompt, malformed body)
//! - Upstream failures mapped to 500 with error details
//! - History listing order and limits

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use promptdeck::{create_router, LlmError, RouterConfig};

use super::test_utils::{slide_part_count, test_service, FailingGenerator, MockGenerator};

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn router_with(generator: MockGenerator, dir: &std::path::Path) -> Router {
    create_router(
        test_service(generator, dir),
        RouterConfig::new().with_tracing(false),
    )
}

// =============================================================================
// Chat Endpoint
// =============================================================================

#[tokio::test]
async fn test_chat_success() {
    let dir = tempfile::tempdir().unwrap();
    let generator = MockGenerator::new("Recursion is...\n\nIt has a base case.");
    let router = router_with(generator.clone(), dir.path());

    let response = router
        .oneshot(chat_request(r#"{"prompt": "explain recursion"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "PPT generated successfully");
    assert_eq!(body["response"], "Recursion is...\n\nIt has a base case.");
    assert!(body["chatId"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["slideData"]["slides"][0]["title"], "AI Response");
    assert_eq!(
        body["slideData"]["slides"][0]["content"],
        json!(["Recursion is...", "It has a base case."])
    );

    let path = std::path::PathBuf::from(body["pptPath"].as_str().unwrap());
    assert!(path.exists());
    assert_eq!(slide_part_count(&path), 2);
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_chat_accepts_legacy_message_field() {
    let dir = tempfile::tempdir().unwrap();
    let generator = MockGenerator::new("ok");
    let router = router_with(generator.clone(), dir.path());

    let response = router
        .oneshot(chat_request(r#"{"message": "hello there"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.prompts(), vec!["hello there".to_string()]);
}

#[tokio::test]
async fn test_chat_blank_prompt_falls_back_to_message() {
    let dir = tempfile::tempdir().unwrap();
    let generator = MockGenerator::new("ok");
    let router = router_with(generator.clone(), dir.path());

    let response = router
        .oneshot(chat_request(r#"{"prompt": "", "message": "hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.prompts(), vec!["hi".to_string()]);
}

#[tokio::test]
async fn test_chat_missing_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let generator = MockGenerator::new("unused");
    let router = router_with(generator.clone(), dir.path());

    let response = router.oneshot(chat_request("{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "invalid_input");
    assert!(body["details"].as_str().unwrap().contains("Prompt is required"));
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_chat_blank_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let generator = MockGenerator::new("unused");
    let router = router_with(generator.clone(), dir.path());

    let response = router
        .oneshot(chat_request(r#"{"prompt": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_chat_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_with(MockGenerator::new("unused"), dir.path());

    let response = router.oneshot(chat_request("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["code"], "invalid_input");
}

#[tokio::test]
async fn test_chat_upstream_failure() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(
        FailingGenerator::new(LlmError::InvalidCredentials("API key not valid".to_string())),
        dir.path(),
    );
    let router = create_router(service, RouterConfig::new().with_tracing(false));

    let response = router
        .oneshot(chat_request(r#"{"prompt": "anything"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "upstream_failure");
    assert!(body["details"].as_str().unwrap().contains("API key not valid"));

    // Nothing written on upstream failure
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_chat_empty_completion() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_with(MockGenerator::new(""), dir.path());

    let response = router
        .oneshot(chat_request(r#"{"prompt": "anything"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["code"], "upstream_failure");
}

// =============================================================================
// History Endpoint
// =============================================================================

#[tokio::test]
async fn test_history_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_with(MockGenerator::new("text"), dir.path());

    for prompt in ["first", "second", "third"] {
        let body = format!(r#"{{"prompt": "{}"}}"#, prompt);
        let response = router.clone().oneshot(chat_request(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router
        .clone()
        .oneshot(get_request("/api/chat/history"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);
    assert_eq!(body["data"][0]["prompt"], "third");
    assert_eq!(body["data"][2]["prompt"], "first");
    assert!(body["data"][0]["pptPath"].is_string());
    assert!(body["data"][0]["createdAt"].is_string());

    let response = router
        .oneshot(get_request("/api/chat/history?limit=2"))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_history_empty() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_with(MockGenerator::new("text"), dir.path());

    let response = router
        .oneshot(get_request("/api/chat/history"))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_history_invalid_limit() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_with(MockGenerator::new("text"), dir.path());

    let response = router
        .oneshot(get_request("/api/chat/history?limit=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "invalid_input");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_with(MockGenerator::new("text"), dir.path());

    let response = router.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(
        test_service(MockGenerator::new("text"), dir.path()),
        RouterConfig::new()
            .with_cors_origins(vec!["http://localhost:5173".to_string()])
            .with_tracing(false),
    );

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/chat")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );
}
