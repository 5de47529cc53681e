//! Collection tools.
//!
//! Raw access to the user's Discogs vinyl collection and wantlist.

use serde::Deserialize;
use serde_json::Value;

use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register collection tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(collection_get_tool());
}

// ============================================================================
// collection.get
// ============================================================================

#[derive(Debug, Deserialize)]
struct CollectionGetParams {
    #[serde(default)]
    limit: Option<usize>,
    /// Fetch the wantlist instead of the collection
    #[serde(default)]
    wantlist: bool,
}

fn collection_get_tool() -> RegisteredTool {
    ToolBuilder::new("collection.get")
        .description(
            "Get the user's Discogs vinyl collection (or wantlist), with \
             artist, album, year, formats, genres and date added per release",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of releases (default: the whole collection)",
                    "minimum": 1
                },
                "wantlist": {
                    "type": "boolean",
                    "description": "Fetch the wantlist instead of the collection (default false)"
                }
            }
        }))
        .build(collection_get_handler)
}

async fn collection_get_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CollectionGetParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let result = if params.wantlist {
        let wants = ctx
            .collection
            .wantlist(params.limit)
            .await
            .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;
        let count = wants.len();
        serde_json::json!({ "wantlist": wants, "count": count })
    } else {
        let collection = ctx
            .collection
            .collection(params.limit)
            .await
            .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;
        serde_json::json!({
            "releases": collection.releases,
            "total": collection.total,
        })
    };

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}
