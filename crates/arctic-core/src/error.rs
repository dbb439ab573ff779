//! Shared error type across Arctic crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / missing field.
    BadRequest,
    /// Unknown metric, session, or route entity.
    NotFound,
    /// Embedded database failure.
    Persistence,
    /// Language-model upstream failure.
    ExternalService,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Persistence => "PERSISTENCE",
            ClientCode::ExternalService => "EXTERNAL_SERVICE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ArcticError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum ArcticError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence: {0}")]
    Persistence(String),
    #[error("external service: {0}")]
    ExternalService(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl ArcticError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ArcticError::BadRequest(_) => ClientCode::BadRequest,
            ArcticError::NotFound(_) => ClientCode::NotFound,
            ArcticError::Persistence(_) => ClientCode::Persistence,
            ArcticError::ExternalService(_) => ClientCode::ExternalService,
            ArcticError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            ArcticError::Internal(_) => ClientCode::Internal,
        }
    }
}
