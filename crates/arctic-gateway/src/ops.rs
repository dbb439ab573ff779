//! Operational HTTP endpoints.
//!
//! - `/api/health` : liveness with uptime
//! - `/metrics`    : Prometheus text format

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::app_state::AppState;
use crate::storage::now_rfc3339;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
    /// Seconds since start.
    pub uptime: f64,
}

pub async fn health(State(app): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        timestamp: now_rfc3339(),
        uptime: app.uptime().as_secs_f64(),
    })
}

pub async fn metrics(State(app): State<AppState>) -> Response {
    let snap = app.snapshot();
    let extra = [
        ("arctic_uptime_seconds", app.uptime().as_secs()),
        ("arctic_snapshot_tick", snap.tick),
    ];
    let body = app.metrics().render(&extra);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
