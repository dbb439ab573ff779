use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use arctic_core::error::{ArcticError, ClientCode};

/// HTTP face of `ArcticError`.
#[derive(Debug)]
pub struct ApiError(pub ArcticError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<ArcticError> for ApiError {
    fn from(e: ArcticError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::ExternalService => StatusCode::BAD_GATEWAY,
            ClientCode::Persistence | ClientCode::UnsupportedVersion | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.0.client_code().as_str();

        // 4xx carry the validation message; 5xx stay generic on the wire.
        let msg = match &self.0 {
            ArcticError::BadRequest(m) | ArcticError::NotFound(m) => m.clone(),
            other => {
                tracing::error!(error = %other, code, "request failed");
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": msg, "code": code }))).into_response()
    }
}
