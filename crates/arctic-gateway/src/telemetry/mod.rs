//! Tick driver: owns the `MetricStore`, publishes snapshots, mirrors to SQLite.
//!
//! - Each tick replaces the published `Arc<Snapshot>` (readers never lock the store).
//! - Persistence runs on the blocking pool and is not awaited by the timer, so
//!   a slow disk never delays the next tick.
//! - Write failures are logged and counted; the in-memory store is not rolled back.

use std::sync::Arc;
use std::time::Instant as StdInstant;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use arctic_core::telemetry::{MetricKind, MetricStore, Snapshot};

use crate::obs::metrics::ArcticMetrics;
use crate::storage::{now_rfc3339, Database};

/// Read side handed to request handlers.
pub type SnapshotRx = watch::Receiver<Arc<Snapshot>>;

pub struct TelemetryTicker {
    store: MetricStore,
    tx: watch::Sender<Arc<Snapshot>>,
    db: Arc<Database>,
    metrics: Arc<ArcticMetrics>,
    retention: Option<u32>,
}

impl TelemetryTicker {
    pub fn new(
        db: Arc<Database>,
        metrics: Arc<ArcticMetrics>,
        retention: Option<u32>,
    ) -> (Self, SnapshotRx) {
        let store = MetricStore::new();
        let (tx, rx) = watch::channel(Arc::new(store.snapshot()));
        (
            Self { store, tx, db, metrics, retention },
            rx,
        )
    }

    /// Mirror the current snapshot without advancing (start-up sync).
    pub fn mirror_current(&self) -> JoinHandle<()> {
        let snap = Arc::clone(&*self.tx.borrow());
        self.persist(snap, now_rfc3339())
    }

    /// One random-walk tick.
    pub fn tick(&mut self) -> JoinHandle<()> {
        let snap = self.store.tick(&mut rand::rng());
        self.publish(snap)
    }

    /// One tick with caller-chosen perturbations.
    pub fn tick_with<F>(&mut self, perturb: F) -> JoinHandle<()>
    where
        F: FnMut(MetricKind, f64) -> f64,
    {
        let snap = self.store.tick_with(perturb);
        self.publish(snap)
    }

    /// Tick every `period` until the task is dropped.
    pub async fn run(mut self, period: Duration) {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(period_ms = period.as_millis() as u64, "telemetry ticker started");
        loop {
            timer.tick().await;
            // Persistence handle intentionally not awaited.
            let _ = self.tick();
        }
    }

    fn publish(&mut self, snap: Snapshot) -> JoinHandle<()> {
        let at = now_rfc3339();
        let snap = Arc::new(snap);
        self.tx.send_replace(Arc::clone(&snap));
        self.metrics.ticks.inc(&[]);
        tracing::trace!(tick = snap.tick, "telemetry tick");
        self.persist(snap, at)
    }

    fn persist(&self, snap: Arc<Snapshot>, at: String) -> JoinHandle<()> {
        let db = Arc::clone(&self.db);
        let metrics = Arc::clone(&self.metrics);
        let retention = self.retention;
        tokio::task::spawn_blocking(move || mirror(&db, &metrics, &snap, &at, retention))
    }
}

/// Upsert then append, per metric, best-effort.
fn mirror(db: &Database, metrics: &ArcticMetrics, snap: &Snapshot, at: &str, retention: Option<u32>) {
    let started = StdInstant::now();

    for m in snap.iter_all() {
        let metric = m.kind.as_str();
        if let Err(e) = db.upsert_current(&m, at) {
            tracing::error!(metric, error = %e, "sync current value failed");
            metrics.persist_failures.inc(&[("table", "dashboard_data")]);
        }
        if let Err(e) = db.append_history(m.kind, m.value, at) {
            tracing::error!(metric, error = %e, "save history failed");
            metrics.persist_failures.inc(&[("table", "dashboard_history")]);
            continue;
        }
        if let Some(keep) = retention {
            match db.prune_history(m.kind, keep) {
                Ok(0) => {}
                Ok(n) => metrics.history_pruned.add(&[("metric", metric)], n as u64),
                Err(e) => {
                    tracing::warn!(metric, error = %e, "prune history failed");
                    metrics.persist_failures.inc(&[("table", "dashboard_history")]);
                }
            }
        }
    }

    metrics.persist_duration.observe(&[], started.elapsed());
}
