use chrono::Utc;
use rusqlite::{params, Connection};

use arctic_core::chat::{new_session_id, ChatRole, DEFAULT_SESSION_ID};
use arctic_core::error::{ArcticError, Result};

use super::{now_rfc3339, persistence, ChatMessage, ChatSession, Database};

impl Database {
    /// Insert a session with zero messages. `title` must already be normalized.
    pub fn create_session(&self, title: &str) -> Result<ChatSession> {
        let session_id = new_session_id(Utc::now().timestamp_millis(), &mut rand::rng());
        let now = now_rfc3339();

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO chat_sessions (session_id, title, created_at, updated_at, message_count)
             VALUES (?1, ?2, ?3, ?3, 0)",
            params![session_id, title, now],
        )
        .map_err(persistence)?;

        Ok(ChatSession {
            session_id,
            title: title.to_string(),
            created_at: now.clone(),
            updated_at: now,
            message_count: 0,
        })
    }

    /// Most recently updated first.
    pub fn list_sessions(&self) -> Result<Vec<ChatSession>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT session_id, title, created_at, updated_at, message_count
                 FROM chat_sessions
                 ORDER BY updated_at DESC, id DESC",
            )
            .map_err(persistence)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ChatSession {
                    session_id: row.get(0)?,
                    title: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                    message_count: row.get(4)?,
                })
            })
            .map_err(persistence)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(persistence)?;
        Ok(rows)
    }

    /// Delete a session and, by cascade, its messages. `default` is reserved.
    pub fn delete_session(&self, session_id: &str) -> Result<()> {
        if session_id.is_empty() || session_id == DEFAULT_SESSION_ID {
            return Err(ArcticError::BadRequest("Cannot delete default session".into()));
        }
        let conn = self.conn()?;
        let n = conn
            .execute("DELETE FROM chat_sessions WHERE session_id = ?1", [session_id])
            .map_err(persistence)?;
        if n == 0 {
            return Err(ArcticError::NotFound(format!("chat session '{session_id}' not found")));
        }
        Ok(())
    }

    /// Insert a message and recompute the owning session's counter in one transaction.
    pub fn save_message(&self, role: ChatRole, content: &str, session_id: &str) -> Result<ChatMessage> {
        let now = now_rfc3339();
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(persistence)?;

        ensure_session(&tx, session_id)?;
        tx.execute(
            "INSERT INTO chat_messages (role, content, session_id, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![role.as_str(), content, session_id, now],
        )
        .map_err(persistence)?;
        let id = tx.last_insert_rowid();
        recount(&tx, session_id, &now)?;

        tx.commit().map_err(persistence)?;
        Ok(ChatMessage {
            id,
            role,
            content: content.to_string(),
            timestamp: now,
        })
    }

    /// Oldest first, at most `limit` messages from the start of the session.
    pub fn chat_history(&self, session_id: &str, limit: u32) -> Result<Vec<ChatMessage>> {
        self.query_messages(
            "SELECT id, role, content, timestamp FROM chat_messages
             WHERE session_id = ?1
             ORDER BY timestamp ASC, id ASC
             LIMIT ?2",
            session_id,
            limit,
        )
    }

    /// The last `n` messages of a session, oldest first.
    pub fn recent_messages(&self, session_id: &str, n: u32) -> Result<Vec<ChatMessage>> {
        let mut msgs = self.query_messages(
            "SELECT id, role, content, timestamp FROM chat_messages
             WHERE session_id = ?1
             ORDER BY timestamp DESC, id DESC
             LIMIT ?2",
            session_id,
            n,
        )?;
        msgs.reverse();
        Ok(msgs)
    }

    /// Delete every message of a session; the session row stays. Returns rows removed.
    pub fn clear_history(&self, session_id: &str) -> Result<usize> {
        let now = now_rfc3339();
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(persistence)?;

        ensure_session(&tx, session_id)?;
        let n = tx
            .execute("DELETE FROM chat_messages WHERE session_id = ?1", [session_id])
            .map_err(persistence)?;
        recount(&tx, session_id, &now)?;

        tx.commit().map_err(persistence)?;
        Ok(n)
    }

    pub fn message_count(&self, session_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT COUNT(*) FROM chat_messages WHERE session_id = ?1",
            [session_id],
            |row| row.get(0),
        )
        .map_err(persistence)
    }

    fn query_messages(&self, sql: &str, session_id: &str, limit: u32) -> Result<Vec<ChatMessage>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql).map_err(persistence)?;
        let rows = stmt
            .query_map(params![session_id, limit], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(persistence)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(persistence)?;

        rows.into_iter()
            .map(|(id, role, content, timestamp)| {
                let role = role
                    .parse::<ChatRole>()
                    .map_err(|_| ArcticError::Persistence(format!("corrupt role in message {id}: {role}")))?;
                Ok(ChatMessage { id, role, content, timestamp })
            })
            .collect()
    }
}

fn ensure_session(conn: &Connection, session_id: &str) -> Result<()> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM chat_sessions WHERE session_id = ?1)",
            [session_id],
            |row| row.get(0),
        )
        .map_err(persistence)?;
    if !exists {
        return Err(ArcticError::NotFound(format!("chat session '{session_id}' not found")));
    }
    Ok(())
}

fn recount(conn: &Connection, session_id: &str, now: &str) -> Result<()> {
    conn.execute(
        "UPDATE chat_sessions
         SET message_count = (SELECT COUNT(*) FROM chat_messages WHERE session_id = ?1),
             updated_at = ?2
         WHERE session_id = ?1",
        params![session_id, now],
    )
    .map_err(persistence)?;
    Ok(())
}
