// Argument extraction helpers shared by the tool handlers.
// Only presence and JSON type are checked; anything richer is the store's job.

use serde_json::Value;

use super::ToolError;

/// Required non-empty string argument. Whitespace is kept as-is (`" "` is a
/// legal object key).
pub fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Err(missing(key)),
        Some(Value::String(s)) if s.is_empty() => Err(missing(key)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(wrong_type(key, "string")),
    }
}

/// Required string argument that may be empty (e.g. object content).
pub fn required_text<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Err(missing(key)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(wrong_type(key, "string")),
    }
}

/// Optional string argument; empty strings count as absent.
pub fn optional_str<'a>(args: &'a Value, key: &str) -> Result<Option<&'a str>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(wrong_type(key, "string")),
    }
}

pub fn optional_bool(args: &Value, key: &str, default: bool) -> Result<bool, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(wrong_type(key, "boolean")),
    }
}

/// Lenient string lookup for the canned tools: wrong types fall back like absence.
pub fn str_or<'a>(args: &'a Value, key: &str, fallback: &'a str) -> &'a str {
    args.get(key).and_then(Value::as_str).unwrap_or(fallback)
}

fn missing(key: &str) -> ToolError {
    ToolError::InvalidArgument(format!("Missing required argument: {key}"))
}

fn wrong_type(key: &str, expected: &str) -> ToolError {
    ToolError::InvalidArgument(format!("Argument '{key}' must be a {expected}"))
}
