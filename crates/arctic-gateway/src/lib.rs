//! Arctic Network gateway library entry.
//!
//! Wires the telemetry ticker, SQLite mirror, chat log, assistant proxy, and
//! JSON HTTP surface into one service. Consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod api;
pub mod app_state;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod storage;
pub mod telemetry;
