//! Tebex MCP server.
//!
//! Serves the bridge's tool registry over the MCP stdio transport:
//! newline-delimited JSON-RPC 2.0 requests on stdin, responses on stdout,
//! logs on stderr. The registry is built once at startup and passed
//! explicitly to the serving loop.

mod observability;
mod protocol;

use anyhow::Context as _;
use serde_json::{Map, Value};
use tebex_mcp_bridge::{TebexClient, ToolRegistry};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::observability::{LogFormat, init_observability};
use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeResult, JsonRpcRequest,
    JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION, ServerCapabilities,
    ServerInfo, ToolCallParams, ToolInfo, ToolsCapability, ToolsListResult,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_observability(LogFormat::from_env());

    // Fail fast: without a secret no tool can execute, so there is nothing
    // to serve.
    let client = TebexClient::from_env().context("cannot start tebex-mcp-server")?;
    let registry = ToolRegistry::new(client);
    info!(tools = registry.len(), "tebex-mcp-server listening on stdio");

    serve(&registry).await
}

/// Reads newline-delimited JSON-RPC requests until stdin closes.
async fn serve(registry: &ToolRegistry) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(response) = handle(registry, &line).await else {
            // Notification: no response goes out.
            continue;
        };
        let out = serde_json::to_string(&response)?;
        stdout.write_all(out.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}

/// Handles a single JSON-RPC message; `None` means no response is due.
async fn handle(registry: &ToolRegistry, line: &str) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())),
    };
    let id = request.id.clone();
    debug!(method = %request.method, "request received");

    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::error(id, INVALID_REQUEST, "expected JSON-RPC 2.0"));
    }

    match request.method.as_str() {
        "initialize" => {
            let result = InitializeResult {
                protocol_version: PROTOCOL_VERSION,
                capabilities: ServerCapabilities {
                    tools: ToolsCapability { list_changed: false },
                },
                server_info: ServerInfo {
                    name: "tebex",
                    version: env!("CARGO_PKG_VERSION"),
                },
            };
            Some(to_result_response(id, &result))
        }

        "ping" => Some(JsonRpcResponse::result(id, Value::Object(Map::new()))),

        method if method.starts_with("notifications/") => None,

        "tools/list" => {
            let tools = registry
                .tools()
                .map(|tool| ToolInfo {
                    name: tool.name(),
                    description: tool.description(),
                    input_schema: tool.input_schema(),
                })
                .collect();
            Some(to_result_response(id, &ToolsListResult { tools }))
        }

        "tools/call" => {
            let params: ToolCallParams = match serde_json::from_value(request.params) {
                Ok(params) => params,
                Err(e) => return Some(JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())),
            };
            let response = registry.invoke(&params.name, params.arguments.as_ref()).await;
            Some(to_result_response(id, &response))
        }

        method => Some(JsonRpcResponse::error(
            id,
            METHOD_NOT_FOUND,
            format!("unknown method: {method}"),
        )),
    }
}

/// Serializes a result payload into a success response.
fn to_result_response<T: serde::Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::result(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("serialization error: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn registry() -> ToolRegistry {
        // Tests never hit the network; any unreachable origin will do.
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let client = TebexClient::with_base_url("test-secret", base).unwrap();
        ToolRegistry::new(client)
    }

    async fn handle_line(line: &str) -> Option<JsonRpcResponse> {
        handle(&registry(), line).await
    }

    #[tokio::test]
    async fn test_initialize_reports_tool_capability() {
        let response = handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(wire["result"]["serverInfo"]["name"], "tebex");
        assert_eq!(wire["result"]["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_tools_list_exposes_contracts() {
        let response = handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        let wire = serde_json::to_value(&response).unwrap();
        let tools = wire["result"]["tools"].as_array().unwrap();
        assert!(!tools.is_empty());

        let listing = tools
            .iter()
            .find(|tool| tool["name"] == "list-payments")
            .expect("list-payments is registered");
        assert_eq!(listing["inputSchema"]["properties"]["limit"]["maximum"], 100);
    }

    #[tokio::test]
    async fn test_tool_call_with_bad_arguments_returns_error_envelope() {
        let response = handle_line(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"list-payments","arguments":{"limit":0}}}"#,
        )
        .await
        .unwrap();
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["result"]["isError"], true);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let response =
            handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method_is_method_not_found() {
        let response = handle_line(r#"{"jsonrpc":"2.0","id":4,"method":"resources/list"}"#)
            .await
            .unwrap();
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parse_error_is_reported() {
        let response = handle_line("{not json").await.unwrap();
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["error"]["code"], PARSE_ERROR);
    }
}
