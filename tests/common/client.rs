//! MCP WebSocket test client.

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// Thin JSON-RPC client over the MCP WebSocket.
pub struct McpClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    next_id: i64,
}

impl McpClient {
    /// Connect without performing the initialize handshake.
    pub async fn connect(ws_url: &str) -> Self {
        let (ws, _) = connect_async(ws_url).await.expect("WebSocket connect failed");
        Self { ws, next_id: 1 }
    }

    /// Connect and run the initialize handshake.
    pub async fn connect_initialized(ws_url: &str) -> Self {
        let mut client = Self::connect(ws_url).await;
        let response = client
            .request(
                "initialize",
                json!({
                    "protocolVersion": "2024-11-05",
                    "clientInfo": {"name": "vinyl-scout-tests", "version": "0"}
                }),
            )
            .await;
        assert!(
            response.get("result").is_some(),
            "initialize failed: {}",
            response
        );
        client
    }

    /// Send one request and await its response. Returns the full JSON-RPC
    /// response object.
    pub async fn request(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;

        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        self.ws
            .send(Message::Text(request.to_string().into()))
            .await
            .expect("WebSocket send failed");

        loop {
            let message = self
                .ws
                .next()
                .await
                .expect("WebSocket closed")
                .expect("WebSocket receive failed");

            if let Message::Text(text) = message {
                let response: Value = serde_json::from_str(&text).expect("Invalid JSON response");
                if response.get("id") == Some(&json!(id)) {
                    return response;
                }
            }
        }
    }

    /// Call a tool and decode the JSON payload out of its text content.
    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> Value {
        let response = self
            .request("tools/call", json!({"name": name, "arguments": arguments}))
            .await;

        let result = response
            .get("result")
            .unwrap_or_else(|| panic!("tool call {} failed: {}", name, response));
        let text = result["content"][0]["text"]
            .as_str()
            .expect("missing text content");
        serde_json::from_str(text).expect("tool result is not JSON")
    }

    /// Call a tool expecting a JSON-RPC error; returns the error object.
    pub async fn call_tool_expect_error(&mut self, name: &str, arguments: Value) -> Value {
        let response = self
            .request("tools/call", json!({"name": name, "arguments": arguments}))
            .await;
        response
            .get("error")
            .unwrap_or_else(|| panic!("expected error from {}: {}", name, response))
            .clone()
    }

    /// List the registered tool definitions.
    pub async fn list_tools(&mut self) -> Vec<Value> {
        let response = self.request("tools/list", json!({})).await;
        response["result"]["tools"]
            .as_array()
            .expect("missing tools array")
            .clone()
    }
}
