//! Facade crate for the Arctic Network telemetry backend.
//!
//! Re-exports the domain model and the HTTP gateway so embedders can depend on
//! a single crate.

pub mod core {
    pub use arctic_core::*;
}

pub mod gateway {
    pub use arctic_gateway::*;
}
