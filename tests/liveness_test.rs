//! Liveness endpoint tests
//! Run with: cargo test --test liveness_test

mod common;

use std::net::SocketAddr;

use gemini_discord_bot::infrastructure::http::{serve, ALIVE_BODY};
use tokio::net::TcpListener;

async fn start_server() -> SocketAddr {
    common::ensure_init();

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(serve(listener));
    addr
}

#[tokio::test]
async fn test_root_reports_alive() {
    let addr = start_server().await;

    let response = reqwest::get(format!("http://{}/", addr))
        .await
        .expect("Should reach liveness server");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), ALIVE_BODY);
    assert_eq!(ALIVE_BODY, "I am alive! Bot is running. 🚀");
}

#[tokio::test]
async fn test_alive_without_any_bot_state() {
    // No token, no API key, no gateway: the endpoint still answers
    let addr = start_server().await;

    for _ in 0..3 {
        let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
        assert!(response.status().is_success());
    }
}

#[tokio::test]
async fn test_other_routes_not_found() {
    let addr = start_server().await;

    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let post = reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(post.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}
