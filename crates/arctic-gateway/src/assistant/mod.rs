//! Assistant proxy: turns a chat turn plus live telemetry into a completion.
//!
//! Upstream failures never reach the caller as errors. Every failure mode maps
//! to a fixed reply in the requested language and is flagged `degraded`.

mod openai;
mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use arctic_core::error::Result;
use arctic_core::telemetry::Snapshot;

use crate::config::AssistantSection;
use crate::storage::ChatMessage;

pub use openai::OpenAiCompatClient;
pub use prompt::{build_messages, PromptMessage};

/// A chat-completion backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Ok,
    /// Completion came back empty.
    Empty,
    /// Upstream call failed.
    Failed,
    /// No credential configured.
    Unavailable,
}

impl ReplyOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplyOutcome::Ok => "ok",
            ReplyOutcome::Empty => "empty",
            ReplyOutcome::Failed => "failed",
            ReplyOutcome::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub content: String,
    pub outcome: ReplyOutcome,
}

impl AssistantReply {
    pub fn degraded(&self) -> bool {
        self.outcome != ReplyOutcome::Ok
    }

    fn canned(outcome: ReplyOutcome, lang: Language) -> Self {
        Self {
            content: canned_text(outcome, lang).to_string(),
            outcome,
        }
    }
}

pub fn canned_text(outcome: ReplyOutcome, lang: Language) -> &'static str {
    match (outcome, lang) {
        (ReplyOutcome::Unavailable, Language::Ru) => {
            "Извините, но мой ИИ-мозг временно недоступен! Попробуйте позже. 🤖"
        }
        (ReplyOutcome::Unavailable, Language::En) => {
            "Sorry, my AI brain is temporarily unavailable! Please try again later. 🤖"
        }
        (ReplyOutcome::Empty, Language::Ru) => {
            "Хм, мои датчики что-то не уловили... Попробуйте перефразировать вопрос! 📡"
        }
        (ReplyOutcome::Empty, Language::En) => {
            "Hmm, my sensors didn't catch that... Try rephrasing the question! 📡"
        }
        (ReplyOutcome::Failed | ReplyOutcome::Ok, Language::Ru) => {
            "Ой, кажется у меня небольшие технические неполадки! Попробуйте еще раз через минутку. 🔧"
        }
        (ReplyOutcome::Failed | ReplyOutcome::Ok, Language::En) => {
            "Oops, I seem to have some technical issues! Try again in a minute. 🔧"
        }
    }
}

pub struct Assistant {
    model: Option<Arc<dyn LanguageModel>>,
    history_window: u32,
}

impl Assistant {
    /// Build from config. Without an API key the assistant answers with the
    /// "unavailable" reply only.
    pub fn from_config(cfg: &AssistantSection) -> Result<Self> {
        let model: Option<Arc<dyn LanguageModel>> = match cfg.api_key.as_deref() {
            Some(key) => Some(Arc::new(OpenAiCompatClient::new(cfg, key)?)),
            None => {
                tracing::warn!(env = %cfg.api_key_env, "assistant api key not set; replies will be canned");
                None
            }
        };
        Ok(Self::with_model(model, cfg.history_window))
    }

    pub fn with_model(model: Option<Arc<dyn LanguageModel>>, history_window: u32) -> Self {
        Self { model, history_window }
    }

    pub fn history_window(&self) -> u32 {
        self.history_window
    }

    /// Never fails; see module docs.
    pub async fn reply(
        &self,
        lang: Language,
        user_message: &str,
        history: &[ChatMessage],
        snap: &Snapshot,
    ) -> AssistantReply {
        let Some(model) = self.model.as_ref() else {
            return AssistantReply::canned(ReplyOutcome::Unavailable, lang);
        };

        let messages = build_messages(user_message, history, snap);
        match model.complete(&messages).await {
            Ok(text) if text.trim().is_empty() => AssistantReply::canned(ReplyOutcome::Empty, lang),
            Ok(text) => AssistantReply {
                content: text,
                outcome: ReplyOutcome::Ok,
            },
            Err(e) => {
                tracing::error!(error = %e, "assistant completion failed");
                AssistantReply::canned(ReplyOutcome::Failed, lang)
            }
        }
    }
}
