//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use echochat_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("History limit: {}", cfg.storage.history_limit);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_config, save_config};
pub use schema::{ChatConfig, Config, ResponderConfig, StorageConfig};
