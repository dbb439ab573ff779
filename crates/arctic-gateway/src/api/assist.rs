use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use arctic_core::chat::{ChatRole, DEFAULT_SESSION_ID};
use arctic_core::error::ArcticError;

use crate::api::{ApiJson, ApiResult};
use crate::app_state::AppState;
use crate::assistant::Language;
use crate::storage::now_rfc3339;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistReq {
    pub message: Option<String>,
    pub session_id: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistResponse {
    pub timestamp: String,
    pub session_id: String,
    pub reply: String,
    pub degraded: bool,
}

fn parse_language(raw: Option<&str>) -> Result<Language, ArcticError> {
    match raw {
        None | Some("ru") => Ok(Language::Ru),
        Some("en") => Ok(Language::En),
        Some(other) => Err(ArcticError::BadRequest(format!(
            "language must be 'ru' or 'en', got '{other}'"
        ))),
    }
}

/// `POST /api/chat/assist {message, sessionId, language}`
///
/// Both turns land in the chat log; the reply is canned when the model is
/// unavailable or fails.
pub async fn assist(
    State(app): State<AppState>,
    ApiJson(req): ApiJson<AssistReq>,
) -> ApiResult<Json<AssistResponse>> {
    let message = req
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ArcticError::BadRequest("message is required".into()))?;
    let lang = parse_language(req.language.as_deref())?;
    let session_id = req.session_id.unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let window = app.assistant().history_window();
    let (id, text) = (session_id.clone(), message.clone());
    let history = app
        .with_db(move |db| {
            let history = db.recent_messages(&id, window)?;
            db.save_message(ChatRole::User, &text, &id)?;
            Ok(history)
        })
        .await?;

    let snap = app.snapshot();
    let reply = app.assistant().reply(lang, &message, &history, &snap).await;
    app.metrics()
        .assistant_replies
        .inc(&[("outcome", reply.outcome.as_str())]);

    let (id, content) = (session_id.clone(), reply.content.clone());
    app.with_db(move |db| db.save_message(ChatRole::Assistant, &content, &id))
        .await?;

    Ok(Json(AssistResponse {
        timestamp: now_rfc3339(),
        session_id,
        degraded: reply.degraded(),
        reply: reply.content,
    }))
}
