//! Shared application state.
//!
//! Handlers get the database, the metrics registry, the assistant, and a
//! read-only view of the latest telemetry snapshot. The tick driver that owns
//! metric mutation is returned separately so the caller decides how to run it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use arctic_core::error::{ArcticError, Result};
use arctic_core::telemetry::Snapshot;

use crate::assistant::Assistant;
use crate::config::ArcticConfig;
use crate::obs::metrics::ArcticMetrics;
use crate::storage::Database;
use crate::telemetry::{SnapshotRx, TelemetryTicker};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    snapshots: SnapshotRx,
}

struct AppStateInner {
    cfg: ArcticConfig,
    db: Arc<Database>,
    metrics: Arc<ArcticMetrics>,
    assistant: Assistant,
    started_at: Instant,
}

impl AppState {
    /// Build state plus the ticker that feeds it.
    pub fn new(cfg: ArcticConfig, db: Arc<Database>) -> Result<(Self, TelemetryTicker)> {
        let assistant = Assistant::from_config(&cfg.assistant)?;
        Ok(Self::with_assistant(cfg, db, assistant))
    }

    pub fn with_assistant(
        cfg: ArcticConfig,
        db: Arc<Database>,
        assistant: Assistant,
    ) -> (Self, TelemetryTicker) {
        let metrics = Arc::new(ArcticMetrics::default());
        let (ticker, snapshots) = TelemetryTicker::new(
            Arc::clone(&db),
            Arc::clone(&metrics),
            cfg.telemetry.history_retention,
        );

        let state = Self {
            inner: Arc::new(AppStateInner {
                cfg,
                db,
                metrics,
                assistant,
                started_at: Instant::now(),
            }),
            snapshots,
        };
        (state, ticker)
    }

    pub fn cfg(&self) -> &ArcticConfig {
        &self.inner.cfg
    }

    pub fn db(&self) -> Arc<Database> {
        Arc::clone(&self.inner.db)
    }

    pub fn metrics(&self) -> &ArcticMetrics {
        &self.inner.metrics
    }

    pub fn assistant(&self) -> &Assistant {
        &self.inner.assistant
    }

    /// Latest published snapshot; a cheap `Arc` clone.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshots.borrow())
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started_at.elapsed()
    }

    /// Run a storage call on the blocking pool.
    pub async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| ArcticError::Internal(format!("storage task failed: {e}")))?
    }
}
