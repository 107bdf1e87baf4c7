//! Configuration schema.
//!
//! Hierarchy: `Config` → `StorageConfig`, `ResponderConfig`, `ChatConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

use crate::session::{DEFAULT_HISTORY_KEY, DEFAULT_HISTORY_LIMIT};

/// Root configuration — loaded from `~/.echochat/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub storage: StorageConfig,
    pub responder: ResponderConfig,
    pub chat: ChatConfig,
}

// ─────────────────────────────────────────────
// Storage
// ─────────────────────────────────────────────

/// Where and how session history is persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// Directory of the key-value store.
    pub data_dir: String,
    /// Key the history array is stored under.
    pub history_key: String,
    /// Maximum number of sessions kept in history.
    pub history_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.echochat/storage".to_string(),
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

// ─────────────────────────────────────────────
// Responder
// ─────────────────────────────────────────────

/// Simulated responder settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponderConfig {
    /// Simulated latency before a reply arrives, in milliseconds.
    pub delay_ms: u64,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self { delay_ms: 1000 }
    }
}

// ─────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────

/// Conversation behaviour.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatConfig {
    /// Bot message every new session starts with. `None` starts empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
}
