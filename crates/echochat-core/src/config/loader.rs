//! Config loader — reads `~/.echochat/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.echochat/config.json`
//! 3. Environment variables `ECHOCHAT_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `ECHOCHAT_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `ECHOCHAT_STORAGE__DATA_DIR` → `storage.data_dir`
/// - `ECHOCHAT_STORAGE__HISTORY_KEY` → `storage.history_key`
/// - `ECHOCHAT_STORAGE__HISTORY_LIMIT` → `storage.history_limit`
/// - `ECHOCHAT_RESPONDER__DELAY_MS` → `responder.delay_ms`
/// - `ECHOCHAT_CHAT__GREETING` → `chat.greeting` (empty string clears it)
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("ECHOCHAT_STORAGE__DATA_DIR") {
        config.storage.data_dir = val;
    }
    if let Ok(val) = std::env::var("ECHOCHAT_STORAGE__HISTORY_KEY") {
        if !val.is_empty() {
            config.storage.history_key = val;
        }
    }
    if let Ok(val) = std::env::var("ECHOCHAT_STORAGE__HISTORY_LIMIT") {
        if let Ok(n) = val.parse::<usize>() {
            config.storage.history_limit = n;
        }
    }
    if let Ok(val) = std::env::var("ECHOCHAT_RESPONDER__DELAY_MS") {
        if let Ok(ms) = val.parse::<u64>() {
            config.responder.delay_ms = ms;
        }
    }
    if let Ok(val) = std::env::var("ECHOCHAT_CHAT__GREETING") {
        config.chat.greeting = if val.is_empty() { None } else { Some(val) };
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
