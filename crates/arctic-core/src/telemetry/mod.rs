//! Telemetry primitives.
//!
//! - `metric`: the six tracked readings, their fixed ranges, and trend
//! - `store`: the in-memory random walk and the immutable per-tick snapshot

pub mod metric;
pub mod store;

pub use metric::{Metric, MetricKind, MetricSpec, Trend, TREND_THRESHOLD};
pub use store::{MetricStore, Snapshot};
