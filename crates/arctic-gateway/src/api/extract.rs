//! Body and query extractors that reject with the `{error, code}` shape.
//!
//! Wrong content type, malformed JSON, and type-invalid fields all become
//! `BAD_REQUEST` instead of axum's plain-text 415/422.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use arctic_core::error::ArcticError;

use super::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        Self(ArcticError::BadRequest(r.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self {
        Self(ArcticError::BadRequest(r.body_text()))
    }
}
