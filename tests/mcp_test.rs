// Blob MCP backend - MCP endpoint integration tests
//
// Drives POST /mcp through the real router with an in-memory store injected.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use blob_mcp_backend::config::AppConfig;
use blob_mcp_backend::state::AppState;
use blob_mcp_backend::store::MemoryStore;

const CONTAINER: &str = "test-container";

fn test_state(store: MemoryStore) -> AppState {
    AppState::new(AppConfig::in_memory(CONTAINER), Arc::new(store))
}

/// POST a raw body to /mcp and return (status, raw bytes).
async fn post_raw(state: &AppState, body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
    let response = blob_mcp_backend::create_router(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

/// POST a JSON-RPC request; asserts HTTP 200 and returns the parsed envelope.
async fn rpc(state: &AppState, request: Value) -> Value {
    let (status, bytes) = post_raw(state, request.to_string()).await;
    assert_eq!(status, StatusCode::OK, "JSON-RPC responses always use HTTP 200");
    serde_json::from_slice(&bytes).unwrap()
}

async fn call_tool(state: &AppState, name: &str, arguments: Value) -> Value {
    rpc(
        state,
        json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }),
    )
    .await
}

fn text_of(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

fn error_code(response: &Value) -> i64 {
    response["error"]["code"].as_i64().unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
//  Protocol surface
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn initialize_reports_protocol_and_server_info() {
    let state = test_state(MemoryStore::new());
    let response = rpc(&state, json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" })).await;

    let result = &response["result"];
    assert_eq!(result["protocolVersion"], "2025-06-18");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], true);
    assert!(result["resources"].is_object());
    assert_eq!(result["serverInfo"]["name"], "blob-mcp");
    assert_eq!(result["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(response.get("error").is_none());
}

#[tokio::test]
async fn initialize_and_tools_list_are_byte_identical_across_calls() {
    let state = test_state(MemoryStore::new());
    for method in ["initialize", "tools/list"] {
        let request = json!({ "jsonrpc": "2.0", "id": "same", "method": method }).to_string();
        let (_, first) = post_raw(&state, request.clone()).await;
        let (_, second) = post_raw(&state, request.clone()).await;
        let (_, third) = post_raw(&state, request).await;
        assert_eq!(first, second, "{method} changed between calls");
        assert_eq!(second, third, "{method} changed between calls");
    }
}

#[tokio::test]
async fn tools_list_returns_registry_in_order() {
    let state = test_state(MemoryStore::new());
    let response = rpc(&state, json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" })).await;

    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["greet", "echo", "list_objects", "read_object", "write_object", "delete_object"]
    );
    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert!(!tool["description"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn unknown_and_missing_methods_are_method_not_found() {
    let state = test_state(MemoryStore::new());
    let requests = [
        json!({ "jsonrpc": "2.0", "id": 1, "method": "resources/list" }),
        json!({ "jsonrpc": "2.0", "id": 2, "method": "Initialize" }),
        json!({ "jsonrpc": "2.0", "id": 3 }),
        json!({ "jsonrpc": "2.0", "id": 4, "method": 42 }),
        json!([{ "jsonrpc": "2.0", "id": 5, "method": "initialize" }]),
    ];
    for request in requests {
        let response = rpc(&state, request.clone()).await;
        assert_eq!(error_code(&response), -32601, "request: {request}");
        assert_eq!(response["error"]["message"], "Method not found");
        assert!(response.get("result").is_none());
    }
}

#[tokio::test]
async fn malformed_json_is_parse_error_with_null_id() {
    let state = test_state(MemoryStore::new());
    let (status, bytes) = post_raw(&state, "{ not json").await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error_code(&response), -32700);
    assert!(response["id"].is_null());
}

#[tokio::test]
async fn id_is_echoed_on_every_path() {
    let state = test_state(MemoryStore::new());
    let ids = [json!(1), json!("abc-123"), json!(null), json!(9.5)];
    let bodies = [
        json!({ "method": "initialize" }),
        json!({ "method": "tools/list" }),
        json!({ "method": "nope" }),
        json!({ "method": "tools/call", "params": { "name": "echo", "arguments": { "text": "x" } } }),
        json!({ "method": "tools/call", "params": { "name": "missing_tool" } }),
        json!({ "method": "tools/call", "params": { "name": "read_object", "arguments": {} } }),
        json!({ "method": "tools/call", "params": { "name": "read_object", "arguments": { "object": "absent" } } }),
    ];

    for id in &ids {
        for body in &bodies {
            let mut request = body.clone();
            request["jsonrpc"] = json!("2.0");
            request["id"] = id.clone();
            let response = rpc(&state, request).await;
            assert_eq!(&response["id"], id, "body: {body}");
        }
    }
}

#[tokio::test]
async fn oversized_body_is_invalid_request_with_http_200() {
    let mut config = AppConfig::in_memory(CONTAINER);
    config.max_body_bytes = 64;
    let state = AppState::new(config, Arc::new(MemoryStore::new()));

    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": { "name": "echo", "arguments": { "text": "x".repeat(256) } }
    });
    let (status, bytes) = post_raw(&state, request.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error_code(&response), -32600);
    assert!(response["id"].is_null());
    assert!(response.get("result").is_none());

    // Small requests still go through under the same limit.
    let response = rpc(&state, json!({ "id": 2, "method": "tools/list" })).await;
    assert!(response["result"]["tools"].is_array());
}

#[tokio::test]
async fn request_without_id_gets_null_id() {
    let state = test_state(MemoryStore::new());
    let response = rpc(&state, json!({ "jsonrpc": "2.0", "method": "tools/list" })).await;
    assert!(response.get("id").is_some());
    assert!(response["id"].is_null());
    assert!(response["result"]["tools"].is_array());
}

// ═══════════════════════════════════════════════════════════════════════════
//  tools/call — dispatch errors
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn unknown_tool_is_method_not_found_naming_the_tool() {
    let state = test_state(MemoryStore::new());
    let response = call_tool(&state, "HelloWorld", json!({})).await;
    assert_eq!(error_code(&response), -32601);
    assert!(response["error"]["message"].as_str().unwrap().contains("HelloWorld"));

    // Names are case-sensitive.
    let response = call_tool(&state, "Echo", json!({ "text": "x" })).await;
    assert_eq!(error_code(&response), -32601);
}

#[tokio::test]
async fn missing_tool_name_is_invalid_params() {
    let state = test_state(MemoryStore::new());
    let response = rpc(&state, json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/call" })).await;
    assert_eq!(error_code(&response), -32602);

    let response = rpc(
        &state,
        json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/call", "params": { "arguments": {} } }),
    )
    .await;
    assert_eq!(error_code(&response), -32602);
}

#[tokio::test]
async fn non_object_arguments_are_invalid_params() {
    let state = test_state(MemoryStore::new());
    let response = call_tool(&state, "echo", json!(["hello"])).await;
    assert_eq!(error_code(&response), -32602);
}

#[tokio::test]
async fn absent_arguments_default_to_empty() {
    let state = test_state(MemoryStore::new());
    let response = rpc(
        &state,
        json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/call", "params": { "name": "greet" } }),
    )
    .await;
    assert!(text_of(&response).contains("stranger"));
}

// ═══════════════════════════════════════════════════════════════════════════
//  tools/call — greet / echo
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn greet_uses_given_name_or_stranger() {
    let state = test_state(MemoryStore::new());

    let response = call_tool(&state, "greet", json!({ "name": "Ada" })).await;
    assert!(text_of(&response).contains("Ada"));
    assert_eq!(response["result"]["isError"], false);

    let response = call_tool(&state, "greet", json!({})).await;
    assert!(text_of(&response).contains("stranger"));

    let response = call_tool(&state, "greet", json!({ "name": "" })).await;
    assert!(text_of(&response).contains("stranger"));

    let response = call_tool(&state, "greet", json!({ "name": "  Ada  " })).await;
    assert_eq!(text_of(&response), "Hello,   Ada  ! 👋");
}

#[tokio::test]
async fn echo_returns_exact_text() {
    let state = test_state(MemoryStore::new());

    let response = call_tool(&state, "echo", json!({ "text": "hello" })).await;
    assert_eq!(text_of(&response), "hello");

    let response = call_tool(&state, "echo", json!({ "text": "" })).await;
    assert_eq!(text_of(&response), "");

    let response = call_tool(&state, "echo", json!({})).await;
    assert_eq!(text_of(&response), "");
}

// ═══════════════════════════════════════════════════════════════════════════
//  tools/call — blob storage
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn write_then_read_round_trips_through_the_endpoint() {
    let state = test_state(MemoryStore::new());
    let text = "line one\nline two — ünïcödé";

    let response = call_tool(
        &state,
        "write_object",
        json!({ "object": "notes/a.txt", "content": text }),
    )
    .await;
    assert!(text_of(&response).contains("notes/a.txt"));
    assert_eq!(response["result"]["structuredContent"]["container"], CONTAINER);

    let response = call_tool(&state, "read_object", json!({ "object": "notes/a.txt" })).await;
    assert_eq!(text_of(&response), text);
}

#[tokio::test]
async fn whitespace_object_name_round_trips() {
    let state = test_state(MemoryStore::new());

    let response = call_tool(&state, "write_object", json!({ "object": " ", "content": "spaced" })).await;
    assert!(response.get("error").is_none(), "{response}");

    let response = call_tool(&state, "read_object", json!({ "object": " " })).await;
    assert_eq!(text_of(&response), "spaced");
}

#[tokio::test]
async fn list_objects_uses_default_container_and_prefix() {
    let store = MemoryStore::with_objects([
        (CONTAINER, "logs/2024.txt", vec![]),
        (CONTAINER, "logs/2025.txt", vec![]),
        (CONTAINER, "readme.md", vec![]),
        ("other", "logs/elsewhere.txt", vec![]),
    ]);
    let state = test_state(store);

    let response = call_tool(&state, "list_objects", json!({ "prefix": "logs/" })).await;
    assert_eq!(
        response["result"]["structuredContent"]["objects"],
        json!(["logs/2024.txt", "logs/2025.txt"])
    );

    let response = call_tool(&state, "list_objects", json!({ "container": "other" })).await;
    assert_eq!(
        response["result"]["structuredContent"]["objects"],
        json!(["logs/elsewhere.txt"])
    );
}

#[tokio::test]
async fn read_missing_object_is_application_error() {
    let state = test_state(MemoryStore::new());
    let response = call_tool(&state, "read_object", json!({ "object": "ghost.txt" })).await;
    assert_eq!(error_code(&response), -32000);
    assert!(response["error"]["message"].as_str().unwrap().contains("ghost.txt"));
    assert!(response.get("result").is_none());
}

#[tokio::test]
async fn read_undecodable_object_is_application_error() {
    let store = MemoryStore::with_objects([(CONTAINER, "blob.bin", vec![0xff, 0x00, 0xfe])]);
    let state = test_state(store);

    let response = call_tool(&state, "read_object", json!({ "object": "blob.bin" })).await;
    assert_eq!(error_code(&response), -32000);

    let response = call_tool(
        &state,
        "read_object",
        json!({ "object": "blob.bin", "encoding": "base64" }),
    )
    .await;
    assert_eq!(text_of(&response), "/wD+");
}

#[tokio::test]
async fn missing_required_argument_is_invalid_params() {
    let state = test_state(MemoryStore::new());

    let response = call_tool(&state, "read_object", json!({})).await;
    assert_eq!(error_code(&response), -32602);
    assert!(response["error"]["message"].as_str().unwrap().contains("object"));

    let response = call_tool(&state, "write_object", json!({ "object": "a" })).await;
    assert_eq!(error_code(&response), -32602);

    let response = call_tool(
        &state,
        "read_object",
        json!({ "object": "a", "encoding": "utf-32" }),
    )
    .await;
    assert_eq!(error_code(&response), -32602);
}

#[tokio::test]
async fn write_without_overwrite_conflicts() {
    let store = MemoryStore::with_objects([(CONTAINER, "a.txt", b"original".to_vec())]);
    let state = test_state(store);

    let response = call_tool(
        &state,
        "write_object",
        json!({ "object": "a.txt", "content": "replacement", "overwrite": false }),
    )
    .await;
    assert_eq!(error_code(&response), -32000);

    let response = call_tool(&state, "read_object", json!({ "object": "a.txt" })).await;
    assert_eq!(text_of(&response), "original");

    let response = call_tool(
        &state,
        "write_object",
        json!({ "object": "a.txt", "content": "replacement" }),
    )
    .await;
    assert!(response.get("error").is_none());
    let response = call_tool(&state, "read_object", json!({ "object": "a.txt" })).await;
    assert_eq!(text_of(&response), "replacement");
}

#[tokio::test]
async fn delete_is_consistently_strict() {
    let store = MemoryStore::with_objects([(CONTAINER, "a.txt", b"x".to_vec())]);
    let state = test_state(store);

    let response = call_tool(&state, "delete_object", json!({ "object": "a.txt" })).await;
    assert!(response.get("error").is_none());
    assert!(text_of(&response).contains("a.txt"));

    for _ in 0..2 {
        let response = call_tool(&state, "delete_object", json!({ "object": "a.txt" })).await;
        assert_eq!(error_code(&response), -32000);
    }

    let response = call_tool(&state, "read_object", json!({ "object": "a.txt" })).await;
    assert_eq!(error_code(&response), -32000);
}
