//! Echochat core — message and session types, key-value storage, the
//! bounded session history, and configuration.
//!
//! # Architecture
//!
//! - [`types`] — `Message`, `Sender`, `Session`, `SessionId`
//! - [`storage`] — [`storage::KeyValueStore`] with file and in-memory backends
//! - [`session`] — message log, session recorder, history store
//! - [`config`] — JSON config + env var overrides
//! - [`utils`] — paths and string helpers

pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod types;
pub mod utils;

pub use error::StoreError;
pub use session::{HistoryStore, MessageLog, SessionRecorder};
pub use types::{Message, Sender, Session, SessionId};
