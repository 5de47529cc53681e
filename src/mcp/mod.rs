//! MCP (Model Context Protocol) server.
//!
//! Exposes the listening/collection tools to an LLM agent host. MCP is
//! JSON-RPC 2.0 with specific method names; the transport is a WebSocket
//! at `/v1/mcp`.
//!
//! This server exposes tools only: no MCP resources, and no per-user
//! permission gating, since a single user's agent host is the only client.

pub mod context;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod tools;

pub use context::ToolContext;
pub use handler::{create_mcp_state, mcp_handler, McpState};
pub use protocol::{McpError, McpRequest, McpResponse};
pub use registry::McpRegistry;
