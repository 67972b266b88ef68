// Jaskier Shared Pattern — state
// Blob MCP backend - Application state

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::config::{AppConfig, StoreBackend};
use crate::store::{MemoryStore, ObjectStore, S3Store};

// ── Shared: AppState (project-specific fields vary) ─────────────────────────
/// Central application state. Clone-friendly — every field is Arc or Copy.
///
/// Nothing per-request lives here: the store client is the only shared
/// resource and it is built once, before the router.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Long-lived object store client shared by every request.
    pub store: Arc<dyn ObjectStore>,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
    /// `true` once the listener is bound and serving.
    pub ready: Arc<AtomicBool>,
}

// ── Shared: readiness helpers ───────────────────────────────────────────────
impl AppState {
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Relaxed);
        tracing::info!("Backend marked as READY");
    }
}

impl AppState {
    /// Wrap an already-constructed store. Tests inject a [`MemoryStore`] here.
    pub fn new(config: AppConfig, store: Arc<dyn ObjectStore>) -> Self {
        tracing::info!(
            "AppState initialised — backend: {}, default container: {}",
            store.backend_name(),
            config.default_container
        );

        Self {
            config: Arc::new(config),
            store,
            start_time: Instant::now(),
            started_at: Utc::now(),
            ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Build the configured store backend, then the state around it.
    pub async fn connect(config: AppConfig) -> Self {
        let store: Arc<dyn ObjectStore> = match &config.backend {
            StoreBackend::S3(s3) => Arc::new(S3Store::connect(s3).await),
            StoreBackend::Memory => {
                tracing::warn!("BLOB_BACKEND=memory — objects are not persisted across restarts");
                Arc::new(MemoryStore::new())
            }
        };
        Self::new(config, store)
    }
}
