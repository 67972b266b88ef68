//! Process-wide configuration, resolved once at startup.
//!
//! Values come from the environment (a `.env` file is loaded first by `main`).
//! Anything missing or malformed here is fatal: the server refuses to start
//! rather than failing individual requests later.

use crate::store::S3StoreConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SERVER_NAME: &str = "blob-mcp";
const DEFAULT_REGION: &str = "us-east-1";
/// Default request body limit (10 MB).
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which object store backend to construct.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    S3(S3StoreConfig),
    /// In-process store; contents are lost on restart.
    Memory,
}

impl StoreBackend {
    pub fn label(&self) -> &'static str {
        match self {
            StoreBackend::S3(_) => "s3",
            StoreBackend::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Reported as `serverInfo.name` by `initialize`.
    pub server_name: String,
    pub server_version: String,
    pub default_container: String,
    pub backend: StoreBackend,
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = parse_or(&get, "PORT", DEFAULT_PORT)?;
        let max_body_bytes = parse_or(&get, "MCP_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?;
        let server_name = get("MCP_SERVER_NAME").unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string());
        let default_container = require("BLOB_DEFAULT_CONTAINER")?;

        let backend_name = get("BLOB_BACKEND").unwrap_or_else(|| "s3".to_string());
        let backend = match backend_name.to_ascii_lowercase().as_str() {
            "s3" => StoreBackend::S3(S3StoreConfig {
                access_key_id: require("BLOB_ACCESS_KEY_ID")?,
                secret_access_key: require("BLOB_SECRET_ACCESS_KEY")?,
                region: get("BLOB_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                endpoint: get("BLOB_ENDPOINT"),
                force_path_style: parse_or(&get, "BLOB_FORCE_PATH_STYLE", false)?,
            }),
            "memory" => StoreBackend::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "BLOB_BACKEND",
                    value: backend_name,
                    reason: "expected 's3' or 'memory'".to_string(),
                });
            }
        };

        Ok(Self {
            port,
            server_name,
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            default_container,
            backend,
            max_body_bytes,
        })
    }

    /// Configuration for an in-memory deployment (tests, local experiments).
    pub fn in_memory(default_container: impl Into<String>) -> Self {
        Self {
            port: DEFAULT_PORT,
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            default_container: default_container.into(),
            backend: StoreBackend::Memory,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => match value.parse() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        },
    }
}
