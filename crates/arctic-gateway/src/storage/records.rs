use serde::Serialize;

use arctic_core::chat::ChatRole;

/// One `dashboard_history` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub data_type: String,
    pub value: f64,
    pub timestamp: String,
}

/// One `dashboard_data` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentRow {
    pub data_type: String,
    pub value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub change_24h: f64,
    pub trend: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatSession {
    pub session_id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    pub message_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: i64,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: String,
}
