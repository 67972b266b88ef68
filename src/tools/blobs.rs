// Blob storage tools: argument mapping onto the `ObjectStore` collaborator.

use serde_json::{Value, json};

use super::args::{optional_bool, optional_str, required_str, required_text};
use super::encoding::TextEncoding;
use super::{ToolError, ToolOutput};
use crate::store::ObjectStore;

/// `container` argument, falling back to the configured default.
fn resolve_container<'a>(args: &'a Value, default_container: &'a str) -> Result<&'a str, ToolError> {
    Ok(optional_str(args, "container")?.unwrap_or(default_container))
}

fn resolve_encoding(args: &Value) -> Result<TextEncoding, ToolError> {
    optional_str(args, "encoding")?
        .map(TextEncoding::parse)
        .transpose()
        .map(Option::unwrap_or_default)
}

pub async fn list_objects(
    store: &dyn ObjectStore,
    default_container: &str,
    args: &Value,
) -> Result<ToolOutput, ToolError> {
    let container = resolve_container(args, default_container)?;
    let prefix = optional_str(args, "prefix")?;

    let objects = store.list(container, prefix).await?;
    tracing::debug!(container = %container, count = objects.len(), "list_objects");

    Ok(ToolOutput::text(objects.join("\n")).with_structured(json!({
        "container": container,
        "prefix": prefix,
        "objects": objects,
    })))
}

pub async fn read_object(
    store: &dyn ObjectStore,
    default_container: &str,
    args: &Value,
) -> Result<ToolOutput, ToolError> {
    let container = resolve_container(args, default_container)?;
    let object = required_str(args, "object")?;
    let encoding = resolve_encoding(args)?;

    let bytes = store.read(container, object).await?;
    let text = encoding.decode(&bytes)?;

    Ok(ToolOutput::text(text).with_structured(json!({
        "container": container,
        "object": object,
        "encoding": encoding.label(),
        "bytes": bytes.len(),
    })))
}

pub async fn write_object(
    store: &dyn ObjectStore,
    default_container: &str,
    args: &Value,
) -> Result<ToolOutput, ToolError> {
    let container = resolve_container(args, default_container)?;
    let object = required_str(args, "object")?;
    let content = required_text(args, "content")?;
    let encoding = resolve_encoding(args)?;
    let overwrite = optional_bool(args, "overwrite", true)?;

    let data = encoding.encode(content)?;
    let size = data.len();
    store.write(container, object, data, overwrite).await?;

    tracing::info!(container = %container, object = %object, bytes = size, "object written");

    Ok(
        ToolOutput::text(format!("Wrote '{object}' to container '{container}' ({size} bytes)"))
            .with_structured(json!({
                "container": container,
                "object": object,
                "bytes": size,
                "overwrite": overwrite,
            })),
    )
}

pub async fn delete_object(
    store: &dyn ObjectStore,
    default_container: &str,
    args: &Value,
) -> Result<ToolOutput, ToolError> {
    let container = resolve_container(args, default_container)?;
    let object = required_str(args, "object")?;

    store.delete(container, object).await?;

    tracing::info!(container = %container, object = %object, "object deleted");

    Ok(
        ToolOutput::text(format!("Deleted '{object}' from container '{container}'")).with_structured(
            json!({
                "container": container,
                "object": object,
                "deleted": true,
            }),
        ),
    )
}
