//! Liveness endpoint for hosting platform health checks

use std::net::SocketAddr;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use crate::application::errors::BotError;

pub const ALIVE_BODY: &str = "I am alive! Bot is running. 🚀";

async fn alive() -> &'static str {
    ALIVE_BODY
}

/// Router with the single `GET /` route
pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

/// Serve on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener) -> Result<(), BotError> {
    axum::serve(listener, router())
        .await
        .map_err(|e| BotError::Network(format!("Liveness server stopped: {}", e)))
}

/// Bind `addr` and serve; failures are logged and never reach the bot
pub async fn run_liveness_server(addr: SocketAddr) {
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind liveness server on {}: {}", addr, e);
            return;
        }
    };

    tracing::info!("Liveness server listening on http://{}", addr);
    if let Err(e) = serve(listener).await {
        tracing::error!("{}", e);
    }
}
