// In-memory object store. Containers are created on first write.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ObjectStore, StoreError};

type Container = BTreeMap<String, Vec<u8>>;

#[derive(Default)]
pub struct MemoryStore {
    containers: RwLock<BTreeMap<String, Container>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(container, object, bytes)` entries.
    pub fn with_objects<I, C, O>(objects: I) -> Self
    where
        I: IntoIterator<Item = (C, O, Vec<u8>)>,
        C: Into<String>,
        O: Into<String>,
    {
        let mut containers: BTreeMap<String, Container> = BTreeMap::new();
        for (container, object, data) in objects {
            containers
                .entry(container.into())
                .or_default()
                .insert(object.into(), data);
        }
        Self {
            containers: RwLock::new(containers),
        }
    }

    fn not_found(container: &str, object: &str) -> StoreError {
        StoreError::NotFound {
            container: container.to_string(),
            object: object.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, container: &str, prefix: Option<&str>) -> Result<Vec<String>, StoreError> {
        let containers = self.containers.read().await;
        // An unknown container lists as empty, matching a freshly created bucket.
        let Some(objects) = containers.get(container) else {
            return Ok(Vec::new());
        };
        let prefix = prefix.unwrap_or("");
        Ok(objects
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn read(&self, container: &str, object: &str) -> Result<Vec<u8>, StoreError> {
        let containers = self.containers.read().await;
        containers
            .get(container)
            .and_then(|objects| objects.get(object))
            .cloned()
            .ok_or_else(|| Self::not_found(container, object))
    }

    async fn write(
        &self,
        container: &str,
        object: &str,
        data: Vec<u8>,
        overwrite: bool,
    ) -> Result<(), StoreError> {
        let mut containers = self.containers.write().await;
        let objects = containers.entry(container.to_string()).or_default();
        if !overwrite && objects.contains_key(object) {
            return Err(StoreError::Conflict {
                container: container.to_string(),
                object: object.to_string(),
            });
        }
        objects.insert(object.to_string(), data);
        Ok(())
    }

    async fn delete(&self, container: &str, object: &str) -> Result<(), StoreError> {
        let mut containers = self.containers.write().await;
        containers
            .get_mut(container)
            .and_then(|objects| objects.remove(object))
            .map(|_| ())
            .ok_or_else(|| Self::not_found(container, object))
    }
}
