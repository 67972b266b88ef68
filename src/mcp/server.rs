// Jaskier Shared Pattern -- mcp/server
//! MCP Server — exposes the greet/echo/blob tools as an MCP endpoint.
//!
//! External MCP clients discover and call tools via JSON-RPC 2.0 over HTTP
//! POST at `/mcp`.
//!
//! Supported methods:
//! - `initialize` — server info + capabilities
//! - `tools/list` — list all available tools
//! - `tools/call` — execute a tool
//!
//! Every response, errors included, goes out with HTTP 200; JSON-RPC error
//! semantics live in the body only.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::protocol::{JsonRpcResponse, McpMethod, PROTOCOL_VERSION, RpcError};
use crate::state::AppState;
use crate::tools::{self, ToolKind};

/// MCP JSON-RPC 2.0 endpoint handler.
///
/// The body is taken as raw bytes so malformed JSON still gets a JSON-RPC
/// envelope instead of an extractor rejection. The same goes for bodies the
/// size limit refuses to buffer: they answer `-32600` with HTTP 200.
pub async fn mcp_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<JsonRpcResponse>) {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let reason = rejection.body_text();
            tracing::warn!(status = %rejection.status(), "MCP server: request body rejected: {}", reason);
            let err = RpcError::InvalidRequest(reason);
            return (StatusCode::OK, Json(JsonRpcResponse::failure(Value::Null, &err)));
        }
    };

    let response = match serde_json::from_slice::<Value>(&body) {
        Ok(request) => dispatch(&state, &request).await,
        Err(e) => {
            tracing::debug!("MCP server: unparseable request body: {}", e);
            JsonRpcResponse::failure(Value::Null, &RpcError::Parse(e.to_string()))
        }
    };

    (StatusCode::OK, Json(response))
}

/// Map one decoded request envelope to its response.
///
/// The request id is echoed on every path; a missing id echoes as `null`.
pub async fn dispatch(state: &AppState, request: &Value) -> JsonRpcResponse {
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str).unwrap_or("");

    tracing::debug!(method = %method, "MCP server: incoming request");

    let outcome = match McpMethod::parse(method) {
        Some(McpMethod::Initialize) => Ok(handle_initialize(state)),
        Some(McpMethod::ToolsList) => Ok(handle_tools_list()),
        Some(McpMethod::ToolsCall) => handle_tools_call(state, request).await,
        None => Err(RpcError::MethodNotFound),
    };

    match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(err) => {
            tracing::warn!(method = %method, code = err.code(), "MCP server: {}", err);
            JsonRpcResponse::failure(id, &err)
        }
    }
}

// ── initialize ──────────────────────────────────────────────────────────────

fn handle_initialize(state: &AppState) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true }
        },
        "resources": {},
        "serverInfo": {
            "name": state.config.server_name,
            "version": state.config.server_version
        }
    })
}

// ── tools/list ──────────────────────────────────────────────────────────────

fn handle_tools_list() -> Value {
    json!({ "tools": tools::tool_descriptors() })
}

// ── tools/call ──────────────────────────────────────────────────────────────

async fn handle_tools_call(state: &AppState, request: &Value) -> Result<Value, RpcError> {
    let params = request.get("params");
    let tool_name = params
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("");

    if tool_name.is_empty() {
        return Err(RpcError::InvalidParams("Missing 'name' in params".to_string()));
    }

    let empty = json!({});
    let arguments = match params.and_then(|p| p.get("arguments")) {
        None | Some(Value::Null) => &empty,
        Some(args @ Value::Object(_)) => args,
        Some(_) => {
            return Err(RpcError::InvalidParams(
                "'arguments' must be an object".to_string(),
            ));
        }
    };

    let kind =
        ToolKind::from_name(tool_name).ok_or_else(|| RpcError::UnknownTool(tool_name.to_string()))?;

    tracing::info!(tool = %tool_name, "MCP server: tools/call");

    let output = tools::execute_tool(kind, arguments, state).await?;
    Ok(output.into_result())
}
