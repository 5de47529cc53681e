//! HTTP server shell: the health endpoint and the MCP WebSocket route.

pub mod server;
pub mod state;

pub use server::{make_app, run_server, server_version};
pub use state::ServerState;
