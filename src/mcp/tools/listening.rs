//! Listening-data tools.
//!
//! Raw access to the user's Spotify listening records, one consolidated
//! tool with a `source` selector.

use serde::Deserialize;
use serde_json::Value;

use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};
use crate::spotify::TimeRange;

/// Upstream caps all of these feeds at 50 per page
const MAX_LIMIT: usize = 50;

/// Register listening tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(listening_get_tool());
}

// ============================================================================
// listening.get
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListeningGetParams {
    source: ListeningSource,
    #[serde(default)]
    time_range: Option<TimeRange>,
    #[serde(default = "default_limit")]
    limit: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ListeningSource {
    TopTracks,
    TopArtists,
    SavedAlbums,
    SavedTracks,
    RecentlyPlayed,
}

fn default_limit() -> usize {
    20
}

fn listening_get_tool() -> RegisteredTool {
    ToolBuilder::new("listening.get")
        .description(
            "Get the user's Spotify listening data: top tracks, top artists, \
             saved albums, saved tracks, or recently played tracks",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "source": {
                    "type": "string",
                    "enum": ["top_tracks", "top_artists", "saved_albums", "saved_tracks", "recently_played"],
                    "description": "Which listening feed to fetch"
                },
                "time_range": {
                    "type": "string",
                    "enum": ["short_term", "medium_term", "long_term"],
                    "description": "Aggregation window for top tracks/artists (default medium_term)"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of items (default 20, max 50)",
                    "minimum": 1,
                    "maximum": 50
                }
            },
            "required": ["source"]
        }))
        .build(listening_get_handler)
}

async fn listening_get_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ListeningGetParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let limit = params.limit.min(MAX_LIMIT);
    let time_range = params.time_range.unwrap_or_default();

    let result = match params.source {
        ListeningSource::TopTracks => {
            let tracks = ctx
                .listening
                .top_tracks(time_range, limit)
                .await
                .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;
            serde_json::json!({ "top_tracks": tracks })
        }
        ListeningSource::TopArtists => {
            let artists = ctx
                .listening
                .top_artists(time_range, limit)
                .await
                .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;
            serde_json::json!({ "top_artists": artists })
        }
        ListeningSource::SavedAlbums => {
            let albums = ctx
                .listening
                .saved_albums(limit)
                .await
                .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;
            serde_json::json!({ "saved_albums": albums })
        }
        ListeningSource::SavedTracks => {
            let tracks = ctx
                .listening
                .saved_tracks(limit)
                .await
                .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;
            serde_json::json!({ "saved_tracks": tracks })
        }
        ListeningSource::RecentlyPlayed => {
            let plays = ctx
                .listening
                .recently_played(limit)
                .await
                .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;
            serde_json::json!({ "recently_played": plays })
        }
    };

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}
