//! Cross-service analysis tools.
//!
//! The two tools that earn this server its keep: vinyl purchase
//! recommendations and collection/listening alignment analysis. Upstream
//! fetches for one invocation are independent and run concurrently; the
//! engines themselves are synchronous.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::analysis::{analyze, rank_candidates, recommend, AnalysisMode};
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};
use crate::spotify::TimeRange;

/// How many top tracks seed the candidate ranking
const CANDIDATE_TRACKS: usize = 50;
/// Top artists / recent plays considered by the analysis
const ANALYSIS_FEED_LIMIT: usize = 50;

const DEFAULT_MAX_RESULTS: usize = 10;
const MAX_RESULTS_CAP: usize = 25;

/// Register analysis tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(vinyl_recommend_tool());
    registry.register_tool(vinyl_analyze_tool());
}

// ============================================================================
// vinyl.recommend
// ============================================================================

#[derive(Debug, Deserialize)]
struct VinylRecommendParams {
    #[serde(default)]
    time_range: Option<TimeRange>,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn vinyl_recommend_tool() -> RegisteredTool {
    ToolBuilder::new("vinyl.recommend")
        .description(
            "Recommend albums to buy on vinyl: the user's most-listened albums \
             that are missing from their Discogs collection, ranked by listening",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "time_range": {
                    "type": "string",
                    "enum": ["short_term", "medium_term", "long_term"],
                    "description": "Listening window the ranking is built from (default medium_term)"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of recommendations (default 10, max 25)",
                    "minimum": 1,
                    "maximum": 25
                }
            }
        }))
        .build(vinyl_recommend_handler)
}

async fn vinyl_recommend_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: VinylRecommendParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let time_range = params.time_range.unwrap_or_default();
    let max_results = params.max_results.min(MAX_RESULTS_CAP);

    let (top_tracks, collection) = tokio::try_join!(
        ctx.listening.top_tracks(time_range, CANDIDATE_TRACKS),
        ctx.collection.collection(None),
    )
    .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;

    let candidates = rank_candidates(&top_tracks);
    let report = recommend(&candidates, &collection.releases, max_results);

    ToolsCallResult::json(&report).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// vinyl.analyze
// ============================================================================

#[derive(Debug, Deserialize)]
struct VinylAnalyzeParams {
    #[serde(default)]
    mode: Option<AnalysisMode>,
    #[serde(default)]
    time_range: Option<TimeRange>,
}

fn vinyl_analyze_tool() -> RegisteredTool {
    ToolBuilder::new("vinyl.analyze")
        .description(
            "Analyze how well the vinyl collection and the listening history \
             line up: alignment score, overlap/gap sets, collection insights \
             and artist comparison",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "mode": {
                    "type": "string",
                    "enum": ["insights", "comparison", "full"],
                    "description": "Which report sections to compute (default full)"
                },
                "time_range": {
                    "type": "string",
                    "enum": ["short_term", "medium_term", "long_term"],
                    "description": "Listening window for top tracks/artists (default medium_term)"
                }
            }
        }))
        .build(vinyl_analyze_handler)
}

async fn vinyl_analyze_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: VinylAnalyzeParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mode = params.mode.unwrap_or(AnalysisMode::Full);
    let time_range = params.time_range.unwrap_or_default();

    // The four fetches have no dependency on each other
    let (collection, top_tracks, top_artists, recent_tracks) = tokio::try_join!(
        ctx.collection.collection(None),
        ctx.listening.top_tracks(time_range, ANALYSIS_FEED_LIMIT),
        ctx.listening.top_artists(time_range, ANALYSIS_FEED_LIMIT),
        ctx.listening.recently_played(ANALYSIS_FEED_LIMIT),
    )
    .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;

    let report = analyze(
        &collection.releases,
        &top_tracks,
        &top_artists,
        &recent_tracks,
        mode,
        Utc::now(),
    );

    ToolsCallResult::json(&report).map_err(|e| McpError::InternalError(e.to_string()))
}
