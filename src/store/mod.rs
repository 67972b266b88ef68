//! Object store collaborator.
//!
//! The dispatcher only ever talks to [`ObjectStore`]; the concrete backend is
//! chosen once at startup (`BLOB_BACKEND`) and shared through `AppState`.
//!
//! - [`s3::S3Store`] — S3-compatible object storage (AWS, MinIO, R2, ...).
//! - [`memory::MemoryStore`] — in-process map, used for local dev and tests.

pub mod memory;
pub mod s3;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use s3::{S3Store, S3StoreConfig};

/// Failures reported by an object store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Object '{object}' not found in container '{container}'")]
    NotFound { container: String, object: String },

    #[error("Container '{0}' not found")]
    ContainerNotFound(String),

    #[error("Object '{object}' already exists in container '{container}'")]
    Conflict { container: String, object: String },

    #[error("Object store error: {0}")]
    Backend(String),
}

/// Key-addressed binary storage: container + object name → bytes.
///
/// Implementations must be safe to share across concurrent requests; a single
/// instance lives for the whole process.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short backend label for health output and logs.
    fn backend_name(&self) -> &'static str;

    /// Object names in `container` starting with `prefix` (all when `None`),
    /// in the backend's native listing order.
    async fn list(&self, container: &str, prefix: Option<&str>) -> Result<Vec<String>, StoreError>;

    async fn read(&self, container: &str, object: &str) -> Result<Vec<u8>, StoreError>;

    /// Create-or-replace when `overwrite` is set, otherwise create-only
    /// ([`StoreError::Conflict`] if the object exists).
    async fn write(
        &self,
        container: &str,
        object: &str,
        data: Vec<u8>,
        overwrite: bool,
    ) -> Result<(), StoreError>;

    /// Remove an object. Absent objects are [`StoreError::NotFound`].
    async fn delete(&self, container: &str, object: &str) -> Result<(), StoreError>;
}
