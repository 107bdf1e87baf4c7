//! Session state — the active message log, the recorder that snapshots it,
//! and the bounded history it is persisted into.
//!
//! # Storage format
//!
//! The whole history is one JSON array under the `chatSessions` key, newest
//! first, rewritten on every update:
//! `[{"id": 1718000000000, "timestamp": "...", "messages": [...], "title": "..."}]`

pub mod history;
pub mod log;
pub mod recorder;

pub use history::{HistoryStore, DEFAULT_HISTORY_KEY, DEFAULT_HISTORY_LIMIT};
pub use log::MessageLog;
pub use recorder::{SessionRecorder, TitleSource, TITLE_MAX_CHARS};
