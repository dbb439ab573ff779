use std::fmt;
use std::net::SocketAddr;

use serde::Deserialize;
use arctic_core::error::{ArcticError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArcticConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub telemetry: TelemetrySection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub assistant: AssistantSection,
}

impl Default for ArcticConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            telemetry: TelemetrySection::default(),
            storage: StorageSection::default(),
            assistant: AssistantSection::default(),
        }
    }
}

impl ArcticConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ArcticError::UnsupportedVersion);
        }
        self.server.validate()?;
        self.telemetry.validate()?;
        self.storage.validate()?;
        self.assistant.validate()?;
        Ok(())
    }

    /// Apply `PORT` and the assistant key. `lookup` reads one env var.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ArcticError::BadRequest(format!("PORT must be a u16, got {port:?}")))?;
            let mut addr = self.server.listen_addr()?;
            addr.set_port(port);
            self.server.listen = addr.to_string();
        }

        self.assistant.api_key = lookup(&self.assistant.api_key_env)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            ArcticError::BadRequest(format!(
                "server.listen must be a valid SocketAddr, got {:?}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:3001".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_history_limit")]
    pub default_history_limit: u32,

    /// Per-metric cap on `dashboard_history` rows. `None` keeps everything.
    #[serde(default)]
    pub history_retention: Option<u32>,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            default_history_limit: default_history_limit(),
            history_retention: None,
        }
    }
}

impl TelemetrySection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60_000).contains(&self.tick_interval_ms) {
            return Err(ArcticError::BadRequest(
                "telemetry.tick_interval_ms must be between 100 and 60000".into(),
            ));
        }
        if self.default_history_limit == 0 {
            return Err(ArcticError::BadRequest(
                "telemetry.default_history_limit must be at least 1".into(),
            ));
        }
        if self.history_retention == Some(0) {
            return Err(ArcticError::BadRequest(
                "telemetry.history_retention must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_history_limit() -> u32 {
    60
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self { path: default_storage_path() }
    }
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(ArcticError::BadRequest("storage.path must not be empty".into()));
        }
        Ok(())
    }
}

fn default_storage_path() -> String {
    "db/arctic.db".into()
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Prior session messages forwarded with each request.
    #[serde(default = "default_history_window")]
    pub history_window: u32,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Unset leaves the HTTP client's default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Filled from `api_key_env` by `ArcticConfig::apply_env`.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for AssistantSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            history_window: default_history_window(),
            api_key_env: default_api_key_env(),
            timeout_ms: None,
            api_key: None,
        }
    }
}

impl fmt::Debug for AssistantSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantSection")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("history_window", &self.history_window)
            .field("api_key_env", &self.api_key_env)
            .field("timeout_ms", &self.timeout_ms)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AssistantSection {
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ArcticError::BadRequest(
                "assistant.base_url must start with http:// or https://".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ArcticError::BadRequest(
                "assistant.temperature must be between 0 and 2".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(ArcticError::BadRequest("assistant.max_tokens must be at least 1".into()));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(ArcticError::BadRequest("assistant.api_key_env must not be empty".into()));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.proxyapi.ru/openai/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_history_window() -> u32 {
    10
}
fn default_api_key_env() -> String {
    "VITE_PROXYAPI_KEY".into()
}
