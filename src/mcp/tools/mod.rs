//! MCP tools exposed to the agent host.

pub mod collection;
pub mod listening;
pub mod vinyl;

use super::registry::McpRegistry;

/// Register every tool with the registry
pub fn register_all_tools(registry: &mut McpRegistry) {
    listening::register_tools(registry);
    collection::register_tools(registry);
    vinyl::register_tools(registry);
}
