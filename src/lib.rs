//! Vinyl Scout
//!
//! An MCP server that cross-references a user's Spotify listening history
//! with their Discogs vinyl collection: purchase recommendations and
//! collection/listening alignment analysis, exposed as callable tools.
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod analysis;
pub mod config;
pub mod discogs;
pub mod matching;
pub mod mcp;
pub mod server;
pub mod spotify;

// Re-export commonly used types for convenience
pub use discogs::{CollectionService, DiscogsClient};
pub use server::{make_app, run_server, ServerState};
pub use spotify::{ListeningService, SpotifyClient};
