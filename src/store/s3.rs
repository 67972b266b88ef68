//! S3-compatible object store backend.
//!
//! Containers map to buckets and object names map to keys. One `Client` is
//! built at startup and cloned per call; the SDK pools connections and applies
//! its own retry policy.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;

use super::{ObjectStore, StoreError};

/// Connection settings for [`S3Store`].
#[derive(Debug, Clone)]
pub struct S3StoreConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    /// Custom endpoint URL (for S3-compatible stores).
    pub endpoint: Option<String>,
    /// Force path-style addressing (for S3-compatible stores).
    pub force_path_style: bool,
}

pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub async fn connect(config: &S3StoreConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "blob-mcp-config",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared_config = loader.load().await;

        let mut s3_builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if config.force_path_style {
            s3_builder = s3_builder.force_path_style(true);
        }

        tracing::info!(
            region = %config.region,
            endpoint = config.endpoint.as_deref().unwrap_or("default"),
            "S3 object store client initialised"
        );

        Self {
            client: Client::from_conf(s3_builder.build()),
        }
    }
}

/// Which store operation a failed S3 call belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum S3Operation {
    List,
    Read,
    Write,
    /// `HeadObject` existence check ahead of a delete.
    HeadBeforeDelete,
    Delete,
}

/// Map an S3 error code onto the store taxonomy.
///
/// `code` is the service error code (`NoSuchKey`, `PreconditionFailed`, ...);
/// `message` is used verbatim for anything not mapped to a specific variant.
fn classify_error(
    operation: S3Operation,
    code: Option<&str>,
    container: &str,
    object: &str,
    message: String,
) -> StoreError {
    let not_found = || StoreError::NotFound {
        container: container.to_string(),
        object: object.to_string(),
    };

    match (operation, code) {
        (_, Some("NoSuchBucket")) => StoreError::ContainerNotFound(container.to_string()),
        (S3Operation::Read, Some("NoSuchKey")) => not_found(),
        (S3Operation::HeadBeforeDelete, Some("NotFound" | "NoSuchKey")) => not_found(),
        (S3Operation::Write, Some("PreconditionFailed" | "ConditionalRequestConflict")) => {
            StoreError::Conflict {
                container: container.to_string(),
                object: object.to_string(),
            }
        }
        _ => StoreError::Backend(message),
    }
}

/// Classify a service error, letting a typed "not found" check override the
/// raw code (HeadObject 404s carry no error body).
fn service_failure<E>(
    operation: S3Operation,
    err: E,
    missing: bool,
    container: &str,
    object: &str,
) -> StoreError
where
    E: ProvideErrorMetadata + std::fmt::Display,
{
    let code = match (missing, operation) {
        (true, S3Operation::Read) => Some("NoSuchKey"),
        (true, _) => Some("NotFound"),
        (false, _) => err.code(),
    };
    classify_error(operation, code, container, object, err.to_string())
}

#[async_trait]
impl ObjectStore for S3Store {
    fn backend_name(&self) -> &'static str {
        "s3"
    }

    async fn list(&self, container: &str, prefix: Option<&str>) -> Result<Vec<String>, StoreError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(container)
            .set_prefix(prefix.map(str::to_string))
            .into_paginator()
            .send();

        let mut names = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                service_failure(S3Operation::List, e.into_service_error(), false, container, "")
            })?;
            names.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(str::to_string),
            );
        }
        Ok(names)
    }

    async fn read(&self, container: &str, object: &str) -> Result<Vec<u8>, StoreError> {
        let response = self
            .client
            .get_object()
            .bucket(container)
            .key(object)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                let missing = service_error.is_no_such_key();
                service_failure(S3Operation::Read, service_error, missing, container, object)
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .into_bytes();
        Ok(data.to_vec())
    }

    async fn write(
        &self,
        container: &str,
        object: &str,
        data: Vec<u8>,
        overwrite: bool,
    ) -> Result<(), StoreError> {
        let mut request = self
            .client
            .put_object()
            .bucket(container)
            .key(object)
            .body(ByteStream::from(data));
        if !overwrite {
            // Conditional create: S3 rejects the put if the key already exists.
            request = request.if_none_match("*");
        }

        request.send().await.map_err(|e| {
            service_failure(S3Operation::Write, e.into_service_error(), false, container, object)
        })?;
        Ok(())
    }

    async fn delete(&self, container: &str, object: &str) -> Result<(), StoreError> {
        // S3 deletes are idempotent, so check existence first to report missing objects.
        self.client
            .head_object()
            .bucket(container)
            .key(object)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                let missing = service_error.is_not_found();
                service_failure(S3Operation::HeadBeforeDelete, service_error, missing, container, object)
            })?;

        self.client
            .delete_object()
            .bucket(container)
            .key(object)
            .send()
            .await
            .map_err(|e| {
                service_failure(S3Operation::Delete, e.into_service_error(), false, container, object)
            })?;
        Ok(())
    }
}
