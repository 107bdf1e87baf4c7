//! Turns the active message log into a `Session` snapshot and upserts it.

use chrono::Utc;
use tracing::debug;

use super::history::HistoryStore;
use super::log::MessageLog;
use crate::types::{Message, Session, SessionId};
use crate::utils;

/// Number of characters of the source message kept in a title.
pub const TITLE_MAX_CHARS: usize = 30;

/// Which message a session title is taken from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TitleSource {
    /// The first message in the log, whoever wrote it.
    #[default]
    FirstMessage,
    /// The first user message; used when every log opens with a greeting.
    FirstUserMessage,
}

/// Builds session records from the message log.
///
/// Logs without any user message are never recorded, so an empty log or one
/// holding only the greeting leaves history untouched.
#[derive(Clone, Debug, Default)]
pub struct SessionRecorder {
    title_source: TitleSource,
}

impl SessionRecorder {
    pub fn new(title_source: TitleSource) -> Self {
        SessionRecorder { title_source }
    }

    /// Snapshot `log` as session `id`, or `None` if it has no user content.
    pub fn snapshot(&self, id: SessionId, log: &MessageLog) -> Option<Session> {
        if !log.has_user_content() {
            return None;
        }
        let messages = log.messages().to_vec();
        let title = self.title_for(&messages);
        Some(Session {
            id,
            timestamp: Utc::now(),
            messages,
            title,
        })
    }

    /// Snapshot `log` and upsert it into `history`.
    ///
    /// Returns `true` if a session was recorded.
    pub fn record(&self, id: SessionId, log: &MessageLog, history: &mut HistoryStore) -> bool {
        match self.snapshot(id, log) {
            Some(session) => {
                debug!(session = %id, messages = session.messages.len(), "recording session");
                history.upsert(session);
                true
            }
            None => false,
        }
    }

    /// First 30 characters of the source message plus `"..."`.
    pub fn title_for(&self, messages: &[Message]) -> String {
        let source = match self.title_source {
            TitleSource::FirstMessage => messages.first(),
            TitleSource::FirstUserMessage => messages
                .iter()
                .find(|m| m.is_user())
                .or_else(|| messages.first()),
        };
        let text = source.map(|m| m.text.as_str()).unwrap_or_default();
        utils::clip_with_ellipsis(text, TITLE_MAX_CHARS)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
