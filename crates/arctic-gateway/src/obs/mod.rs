//! Lightweight in-process metrics.
//!
//! Counters and histograms are atomics keyed by label sets and rendered in the
//! Prometheus text format by the `/metrics` handler.

pub mod metrics;
