use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use arctic_core::chat::{normalize_title, ChatRole, DEFAULT_SESSION_ID};
use arctic_core::error::ArcticError;

use crate::api::{ApiJson, ApiQuery, ApiResult};
use crate::app_state::AppState;
use crate::storage::{now_rfc3339, ChatMessage, ChatSession};

const DEFAULT_CHAT_HISTORY_LIMIT: u32 = 50;

#[derive(Debug, Serialize)]
pub struct Ack {
    pub timestamp: String,
    pub success: bool,
    pub message: &'static str,
}

impl Ack {
    fn new(message: &'static str) -> Self {
        Self {
            timestamp: now_rfc3339(),
            success: true,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub timestamp: String,
    pub sessions: Vec<ChatSession>,
}

/// `GET /api/chat/sessions`
pub async fn list_sessions(State(app): State<AppState>) -> ApiResult<Json<SessionsResponse>> {
    let sessions = app.with_db(|db| db.list_sessions()).await?;
    Ok(Json(SessionsResponse {
        timestamp: now_rfc3339(),
        sessions,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionReq {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub timestamp: String,
    pub success: bool,
    pub session_id: String,
    pub title: String,
    pub message: &'static str,
}

/// `POST /api/chat/sessions {title}`
pub async fn create_session(
    State(app): State<AppState>,
    ApiJson(req): ApiJson<CreateSessionReq>,
) -> ApiResult<(StatusCode, Json<CreateSessionResponse>)> {
    let title = normalize_title(req.title.as_deref().unwrap_or_default())?;
    let session = app.with_db(move |db| db.create_session(&title)).await?;

    tracing::info!(session_id = %session.session_id, "chat session created");
    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            timestamp: now_rfc3339(),
            success: true,
            session_id: session.session_id,
            title: session.title,
            message: "Chat session created successfully",
        }),
    ))
}

/// `DELETE /api/chat/sessions/:id`
pub async fn delete_session(
    State(app): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<Ack>> {
    let id = session_id.clone();
    app.with_db(move |db| db.delete_session(&id)).await?;

    tracing::info!(%session_id, "chat session deleted");
    Ok(Json(Ack::new("Chat session deleted successfully")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryQuery {
    pub session_id: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryResponse {
    pub timestamp: String,
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
}

/// `GET /api/chat/history?sessionId=&limit=`
pub async fn get_history(
    State(app): State<AppState>,
    ApiQuery(q): ApiQuery<ChatHistoryQuery>,
) -> ApiResult<Json<ChatHistoryResponse>> {
    let session_id = q.session_id.unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());
    let limit = q.limit.unwrap_or(DEFAULT_CHAT_HISTORY_LIMIT);

    let id = session_id.clone();
    let messages = app.with_db(move |db| db.chat_history(&id, limit)).await?;
    Ok(Json(ChatHistoryResponse {
        timestamp: now_rfc3339(),
        session_id,
        messages,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMessageReq {
    pub role: Option<String>,
    pub content: Option<String>,
    pub session_id: Option<String>,
}

/// `POST /api/chat/message {role, content, sessionId}`
pub async fn save_message(
    State(app): State<AppState>,
    ApiJson(req): ApiJson<SaveMessageReq>,
) -> ApiResult<Json<Ack>> {
    let (Some(role), Some(content)) = (
        req.role.filter(|r| !r.is_empty()),
        req.content.filter(|c| !c.is_empty()),
    ) else {
        return Err(ArcticError::BadRequest("Role and content are required".into()).into());
    };
    let role: ChatRole = role.parse()?;
    let session_id = req.session_id.unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    app.with_db(move |db| db.save_message(role, &content, &session_id)).await?;
    Ok(Json(Ack::new("Message saved successfully")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearHistoryQuery {
    pub session_id: Option<String>,
}

/// `DELETE /api/chat/history?sessionId=`
pub async fn clear_history(
    State(app): State<AppState>,
    ApiQuery(q): ApiQuery<ClearHistoryQuery>,
) -> ApiResult<Json<Ack>> {
    let session_id = q.session_id.unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let id = session_id.clone();
    let removed = app.with_db(move |db| db.clear_history(&id)).await?;

    tracing::info!(%session_id, removed, "chat history cleared");
    Ok(Json(Ack::new("Chat history cleared successfully")))
}
