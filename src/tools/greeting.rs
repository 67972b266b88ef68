// Canned tools: greet + echo. Neither touches the store.

use serde_json::Value;

use super::ToolOutput;
use super::args::str_or;

pub fn greet(args: &Value) -> ToolOutput {
    let name = str_or(args, "name", "");
    // Whitespace-only counts as empty, but a real name is embedded untouched.
    let name = if name.trim().is_empty() { "stranger" } else { name };
    ToolOutput::text(format!("Hello, {name}! 👋"))
}

pub fn echo(args: &Value) -> ToolOutput {
    ToolOutput::text(str_or(args, "text", ""))
}
