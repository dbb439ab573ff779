//! Service config loader (strict parsing + env overrides).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use arctic_core::error::{ArcticError, Result};

pub use schema::{
    ArcticConfig, AssistantSection, ServerSection, StorageSection, TelemetrySection,
};

/// Env var naming an explicit config path.
pub const CONFIG_PATH_ENV: &str = "ARCTIC_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "arctic.yaml";

pub fn load_from_file(path: &str) -> Result<ArcticConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ArcticError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ArcticConfig> {
    let cfg: ArcticConfig = serde_yaml::from_str(s)
        .map_err(|e| ArcticError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config the binary runs with.
///
/// `ARCTIC_CONFIG` must point at a readable file. Without it, `arctic.yaml` is
/// used when present and built-in defaults otherwise. Env overrides are applied last.
pub fn load() -> Result<ArcticConfig> {
    let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_from_file(&path)?,
        Err(_) => match fs::read_to_string(DEFAULT_CONFIG_PATH) {
            Ok(s) => load_from_str(&s)?,
            Err(e) if e.kind() == ErrorKind::NotFound => ArcticConfig::default(),
            Err(e) => return Err(ArcticError::Internal(format!("read config failed: {e}"))),
        },
    };
    cfg.apply_env(|k| std::env::var(k).ok())?;
    Ok(cfg)
}
