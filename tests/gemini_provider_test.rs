//! Gemini provider against a local mock of the generateContent API
//! Run with: cargo test --test gemini_provider_test

mod common;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use gemini_discord_bot::infrastructure::llm::{GeminiProvider, GenerationError, LLM};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Request as received by the mock
#[derive(Debug, Clone)]
struct Captured {
    action: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Mock {
    status: StatusCode,
    response: Value,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn generate_content(
    State(mock): State<Mock>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.captured.lock().unwrap().push(Captured {
        action,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    (mock.status, Json(mock.response.clone()))
}

async fn start_mock(status: StatusCode, response: Value) -> (SocketAddr, Arc<Mutex<Vec<Captured>>>) {
    common::ensure_init();

    let captured = Arc::new(Mutex::new(Vec::new()));
    let mock = Mock {
        status,
        response,
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/v1beta/models/:action", post(generate_content))
        .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, captured)
}

fn provider(addr: SocketAddr) -> GeminiProvider {
    GeminiProvider::new("test-key", Some("gemini-1.5-flash"))
        .with_base_url(format!("http://{}/v1beta/", addr))
}

#[tokio::test]
async fn test_generate_sends_prompt_and_reads_text() {
    let (addr, captured) = start_mock(StatusCode::OK, json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "Namaste"}, {"text": " dost!"}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 5, "candidatesTokenCount": 3, "totalTokenCount": 8},
        "modelVersion": "gemini-1.5-flash-002"
    })).await;

    let response = provider(addr).generate("Say hi").await.expect("generation succeeds");

    assert_eq!(response.content, "Namaste dost!");
    assert_eq!(response.model, "gemini-1.5-flash-002");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.usage.and_then(|u| u.total_tokens), Some(8));

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].action, "gemini-1.5-flash:generateContent");
    assert_eq!(captured[0].api_key.as_deref(), Some("test-key"));
    assert_eq!(captured[0].body["contents"][0]["parts"][0]["text"], "Say hi");
    assert_eq!(captured[0].body["contents"][0]["role"], "user");
    assert!(captured[0].body.get("generationConfig").is_none());
}

#[tokio::test]
async fn test_generation_config_is_sent_when_set() {
    let (addr, captured) = start_mock(StatusCode::OK, json!({
        "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
    })).await;

    provider(addr)
        .with_generation_config(Some(0.5), Some(256))
        .generate("x")
        .await
        .unwrap();

    let body = captured.lock().unwrap()[0].body.clone();
    assert_eq!(body["generationConfig"]["temperature"], 0.5);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let (addr, _) = start_mock(StatusCode::BAD_REQUEST, json!({
        "error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}
    })).await;

    let err = provider(addr).generate("x").await.unwrap_err();

    match err {
        GenerationError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid. Please pass a valid API key.");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_rate_limit() {
    let (addr, _) = start_mock(StatusCode::TOO_MANY_REQUESTS, json!({})).await;

    let err = provider(addr).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::RateLimited));
}

#[tokio::test]
async fn test_blocked_prompt() {
    let (addr, _) = start_mock(StatusCode::OK, json!({
        "promptFeedback": {"blockReason": "SAFETY"}
    })).await;

    let err = provider(addr).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::Blocked(ref reason) if reason == "SAFETY"));
    assert_eq!(err.to_string(), "Prompt blocked: SAFETY");
}

#[tokio::test]
async fn test_candidate_without_text() {
    let (addr, _) = start_mock(StatusCode::OK, json!({
        "candidates": [{"finishReason": "SAFETY"}]
    })).await;

    let err = provider(addr).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(addr).generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::NetworkError(_)));
}
