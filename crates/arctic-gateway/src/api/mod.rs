//! JSON HTTP surface.
//!
//! - `dashboard`: live snapshot, single metric, persisted history
//! - `recordings`: static recording archive
//! - `chat`: sessions and messages
//! - `assist`: assistant proxy over the chat log

pub mod assist;
pub mod chat;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod recordings;

pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiQuery};
