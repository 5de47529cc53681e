//! MCP WebSocket handler.
//!
//! Handles WebSocket connections for the MCP protocol.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info};

use super::context::ToolContext;
use super::protocol::{
    methods, InitializeParams, InitializeResult, McpError, McpRequest, McpResponse, PingResult,
    ServerCapabilities, ServerInfo, ToolsCallParams, ToolsCapability, ToolsListResult,
    MCP_PROTOCOL_VERSION,
};
use super::registry::McpRegistry;
use crate::server::ServerState;

/// State shared across MCP connections
pub struct McpState {
    pub registry: Arc<McpRegistry>,
}

/// WebSocket upgrade handler for MCP
pub async fn mcp_handler(ws: WebSocketUpgrade, State(state): State<ServerState>) -> Response {
    info!("MCP WebSocket upgrade");
    ws.on_upgrade(move |socket| handle_mcp_socket(socket, state))
}

/// Handle an established MCP WebSocket connection
async fn handle_mcp_socket(socket: WebSocket, state: ServerState) {
    debug!("MCP connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let mut initialized = false;

    while let Some(result) = ws_stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let response = handle_message(&text, &state, &mut initialized).await;

                if let Some(response) = response {
                    match serde_json::to_string(&response) {
                        Ok(json) => {
                            if ws_sink.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            error!("Failed to serialize MCP response: {}", e);
                        }
                    }
                }
            }
            Ok(Message::Binary(_)) => {
                debug!("Received binary message, ignoring");
            }
            Ok(Message::Ping(_)) => {
                // Axum/tungstenite handles pong automatically
            }
            Ok(Message::Pong(_)) => {}
            Ok(Message::Close(_)) => {
                debug!("Received close frame");
                break;
            }
            Err(e) => {
                debug!("WebSocket error: {}", e);
                break;
            }
        }
    }

    debug!("MCP connection closed");
}

/// Handle a single MCP message
async fn handle_message(
    text: &str,
    state: &ServerState,
    initialized: &mut bool,
) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_str(text) {
        Ok(req) => req,
        Err(e) => {
            return Some(McpResponse::error(
                None,
                McpError::ParseError(e.to_string()),
            ));
        }
    };

    let request_id = request.id.clone();

    let result = match request.method.as_str() {
        methods::INITIALIZE => handle_initialize(&request, state, initialized).await,
        methods::INITIALIZED => {
            // Notification, no response needed
            return None;
        }
        methods::PING => handle_ping(&request).await,
        methods::TOOLS_LIST => {
            if !*initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_tools_list(state).await
            }
        }
        methods::TOOLS_CALL => {
            if !*initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_tools_call(&request, state).await
            }
        }
        methods::SHUTDOWN => {
            // Client is disconnecting gracefully
            return None;
        }
        other => Err(McpError::MethodNotFound(other.to_string())),
    };

    Some(match result {
        Ok(value) => McpResponse::success(request_id, value),
        Err(error) => McpResponse::error(Some(request_id), error),
    })
}

async fn handle_initialize(
    request: &McpRequest,
    state: &ServerState,
    initialized: &mut bool,
) -> Result<serde_json::Value, McpError> {
    let _params: Option<InitializeParams> = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?;

    *initialized = true;

    let result = InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability { list_changed: None }),
        },
        server_info: ServerInfo {
            name: "vinyl-scout".to_string(),
            version: state.server_version.clone(),
        },
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_ping(_request: &McpRequest) -> Result<serde_json::Value, McpError> {
    serde_json::to_value(PingResult {}).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_tools_list(state: &ServerState) -> Result<serde_json::Value, McpError> {
    let result = ToolsListResult {
        tools: state.mcp.registry.list_tools(),
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_tools_call(
    request: &McpRequest,
    state: &ServerState,
) -> Result<serde_json::Value, McpError> {
    let params: ToolsCallParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

    let tool = state
        .mcp
        .registry
        .get_tool(&params.name)
        .ok_or_else(|| McpError::MethodNotFound(format!("Unknown tool: {}", params.name)))?;

    let ctx = ToolContext {
        listening: state.listening.clone(),
        collection: state.collection.clone(),
        server_version: state.server_version.clone(),
    };

    let arguments = params.arguments.clone().unwrap_or(serde_json::json!({}));
    let result = (tool.handler)(ctx, arguments).await?;

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

/// Create the MCP state with all tools registered
pub fn create_mcp_state() -> McpState {
    let mut registry = McpRegistry::new();

    super::tools::register_all_tools(&mut registry);

    info!(
        "MCP registry initialized with {} tools",
        registry.tool_count()
    );

    McpState {
        registry: Arc::new(registry),
    }
}
