use rand::Rng;
use serde::Serialize;

use super::metric::{Metric, MetricKind};

/// Immutable copy of every metric, taken at the end of a tick.
///
/// Readers hold one of these behind an `Arc` and never observe a tick half-applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Number of ticks applied before this snapshot (0 = initial values).
    pub tick: u64,
    pub metrics: Vec<Metric>,
}

impl Snapshot {
    /// Never fails: an absent metric reads as its initial record.
    pub fn get(&self, kind: MetricKind) -> Metric {
        self.metrics
            .iter()
            .find(|m| m.kind == kind)
            .copied()
            .unwrap_or_else(|| Metric::initial(kind))
    }

    /// All six metrics in wire order, with fallbacks applied.
    pub fn iter_all(&self) -> impl Iterator<Item = Metric> + '_ {
        MetricKind::ALL.into_iter().map(|k| self.get(k))
    }
}

/// In-memory table of the six metrics, advanced by a bounded random walk.
///
/// The tick driver is the single owner; everyone else reads `Snapshot`s.
#[derive(Debug, Clone)]
pub struct MetricStore {
    metrics: Vec<Metric>,
    ticks: u64,
}

impl Default for MetricStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricStore {
    pub fn new() -> Self {
        Self {
            metrics: MetricKind::ALL.into_iter().map(Metric::initial).collect(),
            ticks: 0,
        }
    }

    /// Advance every metric by `(u - 0.5) * volatility`, `u` uniform in [0, 1).
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Snapshot {
        self.tick_with(|_, volatility| (rng.random::<f64>() - 0.5) * volatility)
    }

    /// Advance every metric with a caller-supplied perturbation.
    ///
    /// The closure receives the metric and its volatility and returns the raw delta.
    pub fn tick_with<F>(&mut self, mut perturb: F) -> Snapshot
    where
        F: FnMut(MetricKind, f64) -> f64,
    {
        for m in self.metrics.iter_mut() {
            let delta = perturb(m.kind, m.kind.spec().volatility);
            *m = m.advanced(delta);
        }
        self.ticks += 1;
        self.snapshot()
    }

    pub fn get(&self, kind: MetricKind) -> Option<&Metric> {
        self.metrics.get(kind.index()).filter(|m| m.kind == kind)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.ticks,
            metrics: self.metrics.clone(),
        }
    }
}
