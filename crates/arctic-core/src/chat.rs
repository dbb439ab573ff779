//! Chat log vocabulary shared by storage and the HTTP surface.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ArcticError, Result};

/// Implicit session every message falls back to. It can be cleared, never deleted.
pub const DEFAULT_SESSION_ID: &str = "default";

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatRole {
    type Err = ArcticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            _ => Err(ArcticError::BadRequest("Role must be 'user' or 'assistant'".into())),
        }
    }
}

/// `chat_<unix millis>_<9 base36 chars>`.
pub fn new_session_id<R: Rng>(unix_millis: i64, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("chat_{unix_millis}_{suffix}")
}

/// Trimmed, non-empty session title.
pub fn normalize_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ArcticError::BadRequest("Title is required".into()));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn session_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = new_session_id(1_700_000_000_123, &mut rng);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "chat");
        assert_eq!(parts[1], "1700000000123");
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn role_parsing_is_exact() {
        assert_eq!("user".parse::<ChatRole>().ok(), Some(ChatRole::User));
        assert_eq!("assistant".parse::<ChatRole>().ok(), Some(ChatRole::Assistant));
        for bad in ["User", "system", "", " user"] {
            let err = bad.parse::<ChatRole>().expect_err("must reject");
            assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
        }
    }

    #[test]
    fn titles_are_trimmed() {
        assert_eq!(normalize_title("  Ice  ").ok().as_deref(), Some("Ice"));
        assert!(normalize_title("   ").is_err());
    }
}
