//! Embedded SQLite store.
//!
//! One connection behind a mutex; every statement is serialized by it. Two
//! concerns share the file:
//! - `telemetry`: current-value upserts and the append-only history log
//! - `chat`: sessions and messages with cascading delete

mod chat;
mod records;
mod telemetry;

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};

use arctic_core::chat::DEFAULT_SESSION_ID;
use arctic_core::error::{ArcticError, Result};

pub use records::{ChatMessage, ChatSession, CurrentRow, HistoryPoint};

const SCHEMA_SQL: &str = include_str!("schema.sql");

#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ArcticError::Persistence(format!("create db dir failed: {e}")))?;
        }
        let conn = Connection::open(path).map_err(persistence)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(persistence)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL).map_err(persistence)?;

        let now = now_rfc3339();
        conn.execute(
            "INSERT OR IGNORE INTO chat_sessions (session_id, title, created_at, updated_at, message_count)
             VALUES (?1, 'Default', ?2, ?2, 0)",
            params![DEFAULT_SESSION_ID, now],
        )
        .map_err(persistence)?;

        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ArcticError::Internal("database mutex poisoned".into()))
    }
}

pub(crate) fn persistence(e: rusqlite::Error) -> ArcticError {
    ArcticError::Persistence(e.to_string())
}

/// Millisecond RFC 3339 in UTC; sorts lexically in time order.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
