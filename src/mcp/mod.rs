// Jaskier Shared Pattern -- mcp
//! MCP (Model Context Protocol) server support.
//!
//! **Protocol** (`protocol`): JSON-RPC 2.0 envelope, error codes, method set.
//!
//! **Server** (`mcp_handler`): routes `initialize`, `tools/list` and
//! `tools/call` to their handlers and owns the error → envelope translation.
//!
//! Protocol: JSON-RPC 2.0 over HTTP (single request per POST, no batching).
//! Spec: <https://modelcontextprotocol.io/specification/2025-06-18>

pub mod protocol;
pub mod server;
