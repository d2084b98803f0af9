//! Keep-alive HTTP listener for external uptime pingers.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Create the keep-alive router.
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(alive))
        .route("/health", get(health))
}

async fn alive() -> &'static str {
    "I'm alive"
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Bind and serve until the listener fails.
pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Keep-alive listening on {}", listener.local_addr()?);
    axum::serve(listener, create_router()).await
}

/// Run the listener in the background. Failures are logged, never fatal.
pub fn spawn(addr: SocketAddr) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = serve(addr).await {
            error!("Keep-alive server on {} stopped: {}", addr, e);
        }
    })
}
