//! Arctic Network core: metric model, bounded random walk, chat vocabulary,
//! and error types.
//!
//! This crate holds the telemetry domain shared by the gateway and its tests.
//! It carries no runtime, storage, or transport dependencies so the random
//! walk can be driven and asserted on synchronously.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `ArcticError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod chat;
pub mod error;
pub mod telemetry;

/// Shared result type.
pub use error::{ArcticError, Result};
