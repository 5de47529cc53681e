//! Router assembly and the serve loop.

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use super::state::ServerState;
use crate::discogs::CollectionService;
use crate::mcp::{create_mcp_state, mcp_handler};
use crate::spotify::ListeningService;

/// Version string reported by `/health` and the MCP initialize handshake.
pub fn server_version() -> String {
    format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"))
}

/// Build the router with all routes and shared state.
pub fn make_app(
    listening: Arc<dyn ListeningService>,
    collection: Arc<dyn CollectionService>,
) -> Router {
    let state = ServerState {
        listening,
        collection,
        mcp: Arc::new(create_mcp_state()),
        server_version: server_version(),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/mcp", get(mcp_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<ServerState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": state.server_version,
    }))
}

/// Bind and serve until the process is stopped.
pub async fn run_server(
    listening: Arc<dyn ListeningService>,
    collection: Arc<dyn CollectionService>,
    port: u16,
) -> Result<()> {
    let app = make_app(listening, collection);

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Serving MCP at ws://0.0.0.0:{}/v1/mcp", port);
    axum::serve(listener, app).await.context("Server failed")
}
