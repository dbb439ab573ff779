//! Axum router wiring.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/dashboard", get(api::dashboard::get_dashboard))
        .route("/api/dashboard/metric/:type", get(api::dashboard::get_metric))
        .route("/api/dashboard/history", get(api::dashboard::get_history))
        .route("/api/recordings", get(api::recordings::list_recordings))
        .route(
            "/api/chat/sessions",
            get(api::chat::list_sessions).post(api::chat::create_session),
        )
        .route("/api/chat/sessions/:id", delete(api::chat::delete_session))
        .route(
            "/api/chat/history",
            get(api::chat::get_history).delete(api::chat::clear_history),
        )
        .route("/api/chat/message", post(api::chat::save_message))
        .route("/api/chat/assist", post(api::assist::assist))
        .route("/api/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
