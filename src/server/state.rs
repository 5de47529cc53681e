//! Shared server state.

use std::sync::Arc;

use crate::discogs::CollectionService;
use crate::mcp::McpState;
use crate::spotify::ListeningService;

/// State shared by all routes. The service clients are injected here once
/// at startup; request handlers clone the Arcs, never construct clients.
#[derive(Clone)]
pub struct ServerState {
    pub listening: Arc<dyn ListeningService>,
    pub collection: Arc<dyn CollectionService>,
    pub mcp: Arc<McpState>,
    pub server_version: String,
}
