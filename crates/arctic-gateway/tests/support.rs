//! Shared fixtures for gateway integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use arctic_gateway::app_state::AppState;
use arctic_gateway::assistant::{Assistant, LanguageModel};
use arctic_gateway::config::ArcticConfig;
use arctic_gateway::router;
use arctic_gateway::storage::Database;
use arctic_gateway::telemetry::TelemetryTicker;

pub struct Harness {
    pub state: AppState,
    pub ticker: TelemetryTicker,
    pub app: Router,
}

pub fn harness(model: Option<Arc<dyn LanguageModel>>) -> Harness {
    let cfg = ArcticConfig::default();
    let db = Arc::new(Database::open_in_memory().unwrap());
    let assistant = Assistant::with_model(model, cfg.assistant.history_window);
    let (state, ticker) = AppState::with_assistant(cfg, db, assistant);
    let app = router::build_router(state.clone());
    Harness { state, ticker, app }
}

pub async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST with no `content-type` header.
pub fn post_untyped(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// JSON content type with a raw, possibly malformed body.
pub fn post_json_text(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
