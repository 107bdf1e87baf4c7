//! Bounded, recency-ordered session history backed by a key-value store.
//!
//! The in-memory list is authoritative for the running process. Every update
//! rewrites the whole stored array; a failed write is logged and the
//! in-memory list is kept.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::storage::KeyValueStore;
use crate::types::{Session, SessionId};

/// Storage key holding the serialized history.
pub const DEFAULT_HISTORY_KEY: &str = "chatSessions";

/// Maximum number of sessions kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Session history repository. Construct once per process and pass it to
/// whatever needs to read or record sessions.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    limit: usize,
    /// Newest first, unique by id, at most `limit` long.
    sessions: Vec<Session>,
}

impl HistoryStore {
    /// Open the history under the default key and limit, loading what is stored.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_options(store, DEFAULT_HISTORY_KEY, DEFAULT_HISTORY_LIMIT)
    }

    /// Open with an explicit storage key and cap. A cap of 0 is treated as 1.
    pub fn with_options(store: Arc<dyn KeyValueStore>, key: impl Into<String>, limit: usize) -> Self {
        let mut history = HistoryStore {
            store,
            key: key.into(),
            limit: limit.max(1),
            sessions: Vec::new(),
        };
        history.load_all();
        history
    }

    /// Re-read the stored history, replacing the in-memory list.
    ///
    /// An absent or malformed value yields an empty history.
    pub fn load_all(&mut self) -> &[Session] {
        self.sessions = match self.store.read(&self.key) {
            None => {
                debug!("No stored history under '{}'", self.key);
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<Session>>(&raw) {
                Ok(sessions) => self.normalize(sessions),
                Err(e) => {
                    warn!("Ignoring malformed history under '{}': {}", self.key, e);
                    Vec::new()
                }
            },
        };
        info!("Loaded {} session(s) from history", self.sessions.len());
        &self.sessions
    }

    /// Insert or refresh `session`: drop any entry with the same id, put the
    /// new record first, cap the list, and persist it.
    ///
    /// Returns `false` if the write failed; the in-memory history is updated
    /// regardless.
    pub fn upsert(&mut self, session: Session) -> bool {
        let id = session.id;
        self.sessions.retain(|s| s.id != id);
        self.sessions.insert(0, session);
        if self.sessions.len() > self.limit {
            let evicted = self.sessions.split_off(self.limit);
            for s in &evicted {
                debug!(session = %s.id, "evicting oldest session from history");
            }
        }
        self.persist()
    }

    /// Look up a session by id.
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// All sessions, most recently updated first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Largest id in history, if any.
    pub fn max_id(&self) -> Option<SessionId> {
        self.sessions.iter().map(|s| s.id).max()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Forget every session and remove the stored value.
    pub fn clear(&mut self) -> bool {
        self.sessions.clear();
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to clear stored history: {}", e);
                false
            }
        }
    }

    /// Enforce the list invariants on data read from storage.
    fn normalize(&self, sessions: Vec<Session>) -> Vec<Session> {
        let mut out: Vec<Session> = Vec::with_capacity(self.limit);
        for session in sessions {
            if out.len() == self.limit {
                break;
            }
            if !session.id.is_in_range() {
                warn!(session = %session.id, "ignoring stored session with out-of-range id");
                continue;
            }
            if out.iter().any(|s| s.id == session.id) {
                continue;
            }
            out.push(session);
        }
        out
    }

    fn persist(&self) -> bool {
        let result = serde_json::to_string(&self.sessions)
            .map_err(crate::error::StoreError::from)
            .and_then(|json| self.store.write(&self.key, &json));

        match result {
            Ok(()) => {
                debug!("Persisted {} session(s) under '{}'", self.sessions.len(), self.key);
                true
            }
            Err(e) => {
                warn!("Failed to persist history, keeping it in memory: {}", e);
                false
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use crate::types::Message;
    use chrono::Utc;
    use tempfile::tempdir;

    fn session(id: i64, text: &str) -> Session {
        Session {
            id: SessionId(id),
            timestamp: Utc::now(),
            messages: vec![Message::user(text)],
            title: format!("{}...", text),
        }
    }

    fn ids(history: &HistoryStore) -> Vec<i64> {
        history.sessions().iter().map(|s| s.id.0).collect()
    }

    #[test]
    fn test_open_empty_store() {
        let history = HistoryStore::open(Arc::new(MemoryStore::new()));
        assert!(history.is_empty());
        assert_eq!(history.limit(), 10);
    }

    #[test]
    fn test_open_malformed_store_is_empty() {
        let store = MemoryStore::with_value(DEFAULT_HISTORY_KEY, "not json {{{");
        let history = HistoryStore::open(Arc::new(store));
        assert!(history.is_empty());
    }

    #[test]
    fn test_open_wrong_shape_is_empty() {
        let store = MemoryStore::with_value(DEFAULT_HISTORY_KEY, r#"{"id": 1}"#);
        let history = HistoryStore::open(Arc::new(store));
        assert!(history.is_empty());
    }

    #[test]
    fn test_upsert_prepends_newest() {
        let mut history = HistoryStore::open(Arc::new(MemoryStore::new()));
        history.upsert(session(1, "a"));
        history.upsert(session(2, "b"));
        history.upsert(session(3, "c"));
        assert_eq!(ids(&history), vec![3, 2, 1]);
    }

    #[test]
    fn test_upsert_existing_moves_to_front() {
        let mut history = HistoryStore::open(Arc::new(MemoryStore::new()));
        history.upsert(session(1, "a"));
        history.upsert(session(2, "b"));
        history.upsert(session(3, "c"));

        history.upsert(session(1, "a again"));

        assert_eq!(ids(&history), vec![1, 3, 2]);
        assert_eq!(history.get(SessionId(1)).unwrap().messages[0].text, "a again");
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = HistoryStore::open(Arc::new(MemoryStore::new()));
        for id in 1..=11 {
            history.upsert(session(id, "x"));
        }
        assert_eq!(history.len(), 10);
        assert!(history.get(SessionId(1)).is_none());
        assert_eq!(ids(&history)[0], 11);
        assert_eq!(*ids(&history).last().unwrap(), 2);
    }

    #[test]
    fn test_cap_and_uniqueness_over_mixed_upserts() {
        let mut history = HistoryStore::open(Arc::new(MemoryStore::new()));
        // Deterministic pseudo-random id sequence with many repeats
        let mut x: i64 = 7;
        for _ in 0..200 {
            x = (x * 31 + 11) % 17;
            history.upsert(session(x, "m"));

            assert!(history.len() <= 10);
            let mut seen = ids(&history);
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), history.len());
            assert_eq!(ids(&history)[0], x);
        }
    }

    #[test]
    fn test_custom_limit() {
        let store = Arc::new(MemoryStore::new());
        let mut history = HistoryStore::with_options(store, "k", 2);
        history.upsert(session(1, "a"));
        history.upsert(session(2, "b"));
        history.upsert(session(3, "c"));
        assert_eq!(ids(&history), vec![3, 2]);

        let zero = HistoryStore::with_options(Arc::new(MemoryStore::new()), "k", 0);
        assert_eq!(zero.limit(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let mut history = HistoryStore::open(Arc::new(MemoryStore::new()));
        history.upsert(session(1, "a"));
        assert!(history.get(SessionId(99)).is_none());
    }

    #[test]
    fn test_every_upsert_rewrites_whole_blob() {
        let store = Arc::new(MemoryStore::new());
        let mut history = HistoryStore::open(store.clone());
        history.upsert(session(1, "a"));
        history.upsert(session(2, "b"));
        assert_eq!(store.write_count(), 2);

        let raw = store.read(DEFAULT_HISTORY_KEY).unwrap();
        let stored: Vec<Session> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, SessionId(2));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let store = Arc::new(MemoryStore::new());
        let mut history = HistoryStore::open(store.clone());
        assert!(history.upsert(session(1, "a")));

        store.set_fail_writes(true);
        assert!(!history.upsert(session(2, "b")));

        // In-memory history moved on, storage still holds the last good write
        assert_eq!(ids(&history), vec![2, 1]);
        let raw = store.read(DEFAULT_HISTORY_KEY).unwrap();
        let stored: Vec<Session> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_load_normalizes_stored_data() {
        let mut stored: Vec<Session> = (1..=12).map(|id| session(id, "x")).collect();
        stored.insert(1, session(1, "duplicate"));
        let store = MemoryStore::with_value(
            DEFAULT_HISTORY_KEY,
            &serde_json::to_string(&stored).unwrap(),
        );

        let history = HistoryStore::open(Arc::new(store));
        assert_eq!(history.len(), 10);
        assert_eq!(history.get(SessionId(1)).unwrap().messages[0].text, "x");
        assert_eq!(ids(&history), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_load_skips_out_of_range_ids() {
        let stored = vec![
            session(i64::MAX, "too far"),
            session(-5, "negative"),
            session(7, "kept"),
        ];
        let store = MemoryStore::with_value(
            DEFAULT_HISTORY_KEY,
            &serde_json::to_string(&stored).unwrap(),
        );

        let history = HistoryStore::open(Arc::new(store));
        assert_eq!(ids(&history), vec![7]);
        assert_eq!(history.max_id(), Some(SessionId(7)));
    }

    #[test]
    fn test_reads_browser_format() {
        let raw = r#"[{"id":1700000000001,"timestamp":"2023-11-14T22:13:20.000Z",
            "messages":[{"text":"hello there","sender":"user"},
                        {"text":"This is a simulated response to: \"hello there\"","sender":"bot"}],
            "title":"hello there..."}]"#;
        let history = HistoryStore::open(Arc::new(MemoryStore::with_value("chatSessions", raw)));
        let s = history.get(SessionId(1_700_000_000_001)).unwrap();
        assert_eq!(s.messages.len(), 2);
        assert_eq!(s.title, "hello there...");
    }

    #[test]
    fn test_persistence_round_trip_on_disk() {
        let dir = tempdir().unwrap();
        {
            let store = FileStore::new(Some(dir.path().to_path_buf())).unwrap();
            let mut history = HistoryStore::open(Arc::new(store));
            history.upsert(session(1, "first"));
            history.upsert(session(2, "second"));
        }

        let store = FileStore::new(Some(dir.path().to_path_buf())).unwrap();
        let history = HistoryStore::open(Arc::new(store));
        assert_eq!(ids(&history), vec![2, 1]);
        assert_eq!(history.max_id(), Some(SessionId(2)));
    }

    #[test]
    fn test_clear() {
        let store = Arc::new(MemoryStore::new());
        let mut history = HistoryStore::open(store.clone());
        history.upsert(session(1, "a"));
        assert!(history.clear());
        assert!(history.is_empty());
        assert!(store.read(DEFAULT_HISTORY_KEY).is_none());
    }
}
