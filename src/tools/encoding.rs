// Text encodings accepted by `read_object` / `write_object`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
    /// Binary-safe: bytes travel as standard base64 text.
    Base64,
}

impl TextEncoding {
    /// Parse an encoding name (case-insensitive, common aliases accepted).
    pub fn parse(name: &str) -> Result<Self, ToolError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            "base64" => Ok(Self::Base64),
            other => Err(ToolError::InvalidArgument(format!(
                "Unsupported encoding: {other} (expected utf-8, ascii, latin-1 or base64)"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
            Self::Base64 => "base64",
        }
    }

    /// Stored bytes → text returned to the caller.
    pub fn decode(self, bytes: &[u8]) -> Result<String, ToolError> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| ToolError::Decode(format!("content is not valid utf-8: {e}"))),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(ToolError::Decode(format!(
                    "content is not valid ascii: byte 0x{:02x} at offset {offset}",
                    bytes[offset]
                ))),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Base64 => Ok(STANDARD.encode(bytes)),
        }
    }

    /// Caller text → bytes to store.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, ToolError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Ascii => {
                if let Some(c) = text.chars().find(|c| !c.is_ascii()) {
                    return Err(ToolError::Encode(format!(
                        "character {c:?} cannot be encoded as ascii"
                    )));
                }
                Ok(text.as_bytes().to_vec())
            }
            Self::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| {
                        ToolError::Encode(format!("character {c:?} cannot be encoded as latin-1"))
                    })
                })
                .collect(),
            Self::Base64 => STANDARD
                .decode(text.trim())
                .map_err(|e| ToolError::Encode(format!("content is not valid base64: {e}"))),
        }
    }
}
