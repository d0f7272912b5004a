//! Persistent Store
//!
//! A passive key-value text store holding two independent entries: the
//! user's display name and the serialized session collection. The store is
//! read once at boot to seed in-memory state; every mutation of the session
//! collection re-serializes and writes.
//!
//! Failure semantics are fail-open throughout: malformed persisted data is
//! treated as absent and never raised to the caller.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::session::ChatSession;

/// Store key for the display name (plain text, absent/empty = not collected)
pub const USER_NAME_KEY: &str = "nerd-ai-username";

/// Store key for the session collection (JSON array of sessions)
pub const CHATS_KEY: &str = "nerd-ai-chats";

/// Key-value text store contract
///
/// Infallible by design: backends swallow and log their own failures so the
/// controller never sees a storage error.
pub trait KvStore {
    /// Read an entry, `None` if absent
    fn get(&self, key: &str) -> Option<String>;

    /// Write an entry, replacing any previous value
    fn set(&self, key: &str, value: &str);

    /// Delete an entry if present
    fn remove(&self, key: &str);
}

/// In-memory store (for development/testing)
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.into(), value.into());
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.remove(key);
    }
}

/// Load the persisted display name; empty string when never collected
pub fn load_user_name(store: &impl KvStore) -> String {
    store.get(USER_NAME_KEY).unwrap_or_default()
}

/// Persist the display name
pub fn save_user_name(store: &impl KvStore, name: &str) {
    store.set(USER_NAME_KEY, name);
}

/// Load the persisted session collection
///
/// An absent entry and an unparseable one both yield an empty collection;
/// corruption is logged and never surfaced.
pub fn load_chats(store: &impl KvStore) -> Vec<ChatSession> {
    let Some(raw) = store.get(CHATS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(chats) => chats,
        Err(err) => {
            tracing::warn!("discarding unparseable session collection: {err}");
            Vec::new()
        }
    }
}

/// Persist the session collection
///
/// An empty collection removes the entry rather than writing `"[]"`.
pub fn save_chats(store: &impl KvStore, chats: &[ChatSession]) {
    if chats.is_empty() {
        store.remove(CHATS_KEY);
        return;
    }
    match serde_json::to_string(chats) {
        Ok(json) => store.set(CHATS_KEY, &json),
        Err(err) => tracing::warn!("failed to serialize session collection: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::session::{ChatId, derive_title};

    fn session(id: i64, title: &str) -> ChatSession {
        let mut s = ChatSession::new(ChatId::from_millis(id), "Derby");
        s.title = title.into();
        s.push(Message::user("hello"));
        s.push(Message::assistant("hi Derby"));
        s
    }

    #[test]
    fn test_round_trip_preserves_ids_titles_and_order() {
        let store = MemoryStore::new();
        let chats = vec![session(3, "c"), session(2, "b"), session(1, &derive_title("a"))];
        save_chats(&store, &chats);

        let loaded = load_chats(&store);
        assert_eq!(loaded, chats);
    }

    #[test]
    fn test_empty_collection_removes_entry() {
        let store = MemoryStore::new();
        save_chats(&store, &[session(1, "a")]);
        assert!(store.get(CHATS_KEY).is_some());

        save_chats(&store, &[]);
        assert_eq!(store.get(CHATS_KEY), None);
    }

    #[test]
    fn test_malformed_payload_loads_as_empty() {
        let store = MemoryStore::new();
        store.set(CHATS_KEY, "{not json");
        assert!(load_chats(&store).is_empty());

        // Wrong shape, valid JSON
        store.set(CHATS_KEY, r#"{"id":1}"#);
        assert!(load_chats(&store).is_empty());
    }

    #[test]
    fn test_user_name_absent_is_empty() {
        let store = MemoryStore::new();
        assert_eq!(load_user_name(&store), "");

        save_user_name(&store, "Derby");
        assert_eq!(load_user_name(&store), "Derby");
    }
}
