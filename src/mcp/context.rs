//! MCP tool execution context.
//!
//! Provides the injected service capabilities to tool implementations.
//! Tools never reach for globals; everything they may touch arrives here.

use std::sync::Arc;

use crate::discogs::CollectionService;
use crate::spotify::ListeningService;

/// Context provided to tool handlers during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Access to the user's Spotify listening data
    pub listening: Arc<dyn ListeningService>,

    /// Access to the user's Discogs collection and wantlist
    pub collection: Arc<dyn CollectionService>,

    /// Server version info
    pub server_version: String,
}
