// src/tools/mod.rs
//! Tool registry and execution for the MCP endpoint.
//!
//! Six tools are exposed, in this order:
//! - `greet` — friendly greeting for a name
//! - `echo` — repeat the given text verbatim
//! - `list_objects` — list object names in a container (optional prefix)
//! - `read_object` — read an object as text
//! - `write_object` — create or replace an object from text
//! - `delete_object` — remove an object
//!
//! Tool names are matched exactly (case-sensitive). Every tool answers with
//! the same MCP content-block shape, see [`ToolOutput::into_result`].

pub mod args;
pub mod blobs;
pub mod encoding;
pub mod greeting;

use serde::Serialize;
use serde_json::{Value, json};

use crate::state::AppState;
use crate::store::StoreError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures raised by tool handlers. The dispatcher decides the wire code.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Output from a tool execution: display text plus optional structured data.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Primary text result
    pub text: String,
    /// Machine-readable payload, surfaced as `structuredContent`
    pub structured: Option<Value>,
}

impl ToolOutput {
    /// Create a text-only output (most common case)
    pub fn text(s: impl Into<String>) -> Self {
        Self {
            text: s.into(),
            structured: None,
        }
    }

    pub fn with_structured(mut self, data: Value) -> Self {
        self.structured = Some(data);
        self
    }

    /// Render as a `tools/call` result.
    pub fn into_result(self) -> Value {
        let mut result = json!({
            "content": [{ "type": "text", "text": self.text }],
            "isError": false,
        });
        if let Some(data) = self.structured {
            result["structuredContent"] = data;
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Greet,
    Echo,
    ListObjects,
    ReadObject,
    WriteObject,
    DeleteObject,
}

impl ToolKind {
    /// Registry order, as reported by `tools/list`.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Greet,
        ToolKind::Echo,
        ToolKind::ListObjects,
        ToolKind::ReadObject,
        ToolKind::WriteObject,
        ToolKind::DeleteObject,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Greet => "greet",
            ToolKind::Echo => "echo",
            ToolKind::ListObjects => "list_objects",
            ToolKind::ReadObject => "read_object",
            ToolKind::WriteObject => "write_object",
            ToolKind::DeleteObject => "delete_object",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn descriptor(self) -> ToolDescriptor {
        let (description, input_schema) = match self {
            ToolKind::Greet => (
                "Returns a friendly hello message for the given name.",
                json!({
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Who to greet (defaults to \"stranger\")" }
                    },
                    "required": ["name"]
                }),
            ),
            ToolKind::Echo => (
                "Repeats back the text you provide.",
                json!({
                    "type": "object",
                    "properties": {
                        "text": { "type": "string", "description": "Text to echo back" }
                    },
                    "required": ["text"]
                }),
            ),
            ToolKind::ListObjects => (
                "List object names in a storage container, optionally filtered by name prefix.",
                json!({
                    "type": "object",
                    "properties": {
                        "container": { "type": "string", "description": "Container name (defaults to the configured container)" },
                        "prefix": { "type": "string", "description": "Only list objects whose name starts with this prefix" }
                    }
                }),
            ),
            ToolKind::ReadObject => (
                "Read an object from a storage container and return its content as text.",
                json!({
                    "type": "object",
                    "properties": {
                        "container": { "type": "string", "description": "Container name (defaults to the configured container)" },
                        "object": { "type": "string", "description": "Object name" },
                        "encoding": { "type": "string", "description": "utf-8 (default), ascii, latin-1 or base64" }
                    },
                    "required": ["object"]
                }),
            ),
            ToolKind::WriteObject => (
                "Write text content to an object in a storage container.",
                json!({
                    "type": "object",
                    "properties": {
                        "container": { "type": "string", "description": "Container name (defaults to the configured container)" },
                        "object": { "type": "string", "description": "Object name" },
                        "content": { "type": "string", "description": "Text content to store" },
                        "encoding": { "type": "string", "description": "utf-8 (default), ascii, latin-1 or base64" },
                        "overwrite": { "type": "boolean", "description": "Replace an existing object (default true)" }
                    },
                    "required": ["object", "content"]
                }),
            ),
            ToolKind::DeleteObject => (
                "Delete an object from a storage container.",
                json!({
                    "type": "object",
                    "properties": {
                        "container": { "type": "string", "description": "Container name (defaults to the configured container)" },
                        "object": { "type": "string", "description": "Object name" }
                    },
                    "required": ["object"]
                }),
            ),
        };

        ToolDescriptor {
            name: self.name(),
            description,
            input_schema,
        }
    }
}

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Build the `tools/list` payload in registry order.
pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    ToolKind::ALL.into_iter().map(ToolKind::descriptor).collect()
}

/// Central dispatcher — routes a resolved tool call to its handler.
pub async fn execute_tool(
    kind: ToolKind,
    args: &Value,
    state: &AppState,
) -> Result<ToolOutput, ToolError> {
    let store = state.store.as_ref();
    let default_container = state.config.default_container.as_str();

    match kind {
        ToolKind::Greet => Ok(greeting::greet(args)),
        ToolKind::Echo => Ok(greeting::echo(args)),
        ToolKind::ListObjects => blobs::list_objects(store, default_container, args).await,
        ToolKind::ReadObject => blobs::read_object(store, default_container, args).await,
        ToolKind::WriteObject => blobs::write_object(store, default_container, args).await,
        ToolKind::DeleteObject => blobs::delete_object(store, default_container, args).await,
    }
}
