//! Common test infrastructure
//!
//! Spawns an isolated server with stub service clients and speaks MCP to
//! it over a real WebSocket. Tests should only import from this module.

mod client;
mod server;
mod stubs;

// Public API - this is what tests import
pub use client::McpClient;
pub use server::TestServer;
pub use stubs::{
    played, release, release_added, top_artist, top_track, StubCollectionService,
    StubListeningService,
};
