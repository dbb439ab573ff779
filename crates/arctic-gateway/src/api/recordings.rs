use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::catalog::{self, Recording};
use crate::storage::now_rfc3339;

#[derive(Debug, Serialize)]
pub struct RecordingsResponse {
    pub timestamp: String,
    pub recordings: Vec<Recording>,
}

/// `GET /api/recordings`
pub async fn list_recordings() -> Json<RecordingsResponse> {
    Json(RecordingsResponse {
        timestamp: now_rfc3339(),
        recordings: catalog::recordings(Utc::now()),
    })
}
