//! Core types for Echochat — chat messages and persisted sessions.
//!
//! The JSON shape matches what is stored under the history key:
//! `{"id": 1718000000000, "timestamp": "...", "messages": [{"text": "...", "sender": "user"}], "title": "..."}`

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// Who authored a message.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single chat turn. Never mutated after creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    /// Create a user-authored message.
    pub fn user(text: impl Into<String>) -> Self {
        Message {
            text: text.into(),
            sender: Sender::User,
        }
    }

    /// Create a bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Message {
            text: text.into(),
            sender: Sender::Bot,
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

// ─────────────────────────────────────────────
// Session id
// ─────────────────────────────────────────────

/// Session identifier: creation time in milliseconds since the Unix epoch.
///
/// Serialized as a bare JSON number. Ids handed out by [`SessionId::next_after`]
/// are strictly increasing even when the clock has not moved.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct SessionId(pub i64);

impl SessionId {
    /// Largest id accepted from storage: 8.64e15 ms after the epoch
    /// (year 275760). Keeps `next_after` far from `i64::MAX`.
    pub const MAX: SessionId = SessionId(8_640_000_000_000_000);

    /// Whether this id lies in `0..=SessionId::MAX`.
    pub fn is_in_range(self) -> bool {
        (0..=Self::MAX.0).contains(&self.0)
    }

    /// An id from the current wall clock.
    pub fn now() -> Self {
        SessionId(Utc::now().timestamp_millis())
    }

    /// A fresh id strictly greater than `floor`.
    ///
    /// Saturates at `i64::MAX`; floors come from in-range ids, so that is
    /// never reached in practice.
    pub fn next_after(floor: SessionId) -> Self {
        let now = Self::now();
        if now > floor {
            now
        } else {
            SessionId(floor.0.saturating_add(1))
        }
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(SessionId)
    }
}

// ─────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────

/// A persisted conversation: a titled, timestamped snapshot of a message log.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Stable key across updates, assigned when the conversation started.
    pub id: SessionId,
    /// When this snapshot was taken (ISO-8601).
    pub timestamp: DateTime<Utc>,
    pub messages: Vec<Message>,
    pub title: String,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_serialization() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, json!({"text": "hi", "sender": "user"}));

        let json = serde_json::to_value(Message::bot("hello")).unwrap();
        assert_eq!(json["sender"], "bot");
    }

    #[test]
    fn test_message_rejects_unknown_sender() {
        let result = serde_json::from_value::<Message>(json!({"text": "x", "sender": "system"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_session_json_shape() {
        let session = Session {
            id: SessionId(1_718_000_000_000),
            timestamp: "2024-06-10T06:13:20Z".parse().unwrap(),
            messages: vec![Message::user("Hello"), Message::bot("Hi")],
            title: "Hello...".to_string(),
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["id"], 1_718_000_000_000i64);
        assert!(json["timestamp"].as_str().unwrap().starts_with("2024-06-10T06:13:20"));
        assert_eq!(json["messages"][1]["sender"], "bot");
        assert_eq!(json["title"], "Hello...");
    }

    #[test]
    fn test_session_parses_browser_iso_timestamp() {
        let raw = r#"{"id": 1700000000000, "timestamp": "2023-11-14T22:13:20.000Z",
                      "messages": [{"text": "hey", "sender": "user"}], "title": "hey..."}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert_eq!(session.id, SessionId(1_700_000_000_000));
        assert!(session.messages[0].is_user());
    }

    #[test]
    fn test_next_after_is_strictly_greater() {
        let far_future = SessionId(i64::MAX - 10);
        assert_eq!(SessionId::next_after(far_future), SessionId(i64::MAX - 9));

        let past = SessionId(0);
        assert!(SessionId::next_after(past) > past);
    }

    #[test]
    fn test_next_after_saturates_instead_of_wrapping() {
        assert_eq!(SessionId::next_after(SessionId(i64::MAX)), SessionId(i64::MAX));
        assert!(SessionId::next_after(SessionId::MAX) > SessionId::MAX);
    }

    #[test]
    fn test_id_range() {
        assert!(SessionId(0).is_in_range());
        assert!(SessionId(1_718_000_000_000).is_in_range());
        assert!(SessionId::MAX.is_in_range());
        assert!(!SessionId(i64::MAX).is_in_range());
        assert!(!SessionId(-1).is_in_range());
    }

    #[test]
    fn test_session_id_from_str() {
        assert_eq!(" 42 ".parse::<SessionId>().unwrap(), SessionId(42));
        assert!("abc".parse::<SessionId>().is_err());
        assert_eq!(SessionId(42).to_string(), "42");
    }
}
