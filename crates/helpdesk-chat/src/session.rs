//! Per-session conversational memory.
//!
//! A session holds the full turn history plus the customer context that
//! lets elliptical follow-ups ("phone", "next customer") resolve. Sessions
//! live for the process lifetime and are never evicted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use helpdesk_llm::ChatTurn;

/// The customer the conversation is currently "about".
///
/// `last_customer_id` is the primary anchor; the name is kept alongside it
/// for name-based lookups that have not resolved to an id yet. When both
/// are set, the id wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerContext {
    pub last_customer_id: Option<i64>,
    pub last_customer_name: Option<String>,
}

/// One conversation: ordered history plus customer context.
#[derive(Debug, Default)]
pub struct Session {
    pub history: Vec<ChatTurn>,
    pub context: CustomerContext,
}

/// Registry of live sessions keyed by the client-supplied session id.
///
/// The outer mutex only guards the map; each session carries its own async
/// mutex so concurrent requests for the same key serialize for the whole
/// turn while different keys proceed in parallel.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Arc<tokio::sync::Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session for `key`, creating an empty one on first sight.
    ///
    /// Idempotent: repeated calls with the same key return the same session.
    pub fn get_or_create(&self, key: &str) -> Arc<tokio::sync::Mutex<Session>> {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            sessions
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(Session::default()))),
        )
    }

    /// Number of sessions created so far.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_starts_empty() {
        let store = SessionStore::new();
        let session = store.get_or_create("alpha");
        let session = session.lock().await;
        assert!(session.history.is_empty());
        assert_eq!(session.context, CustomerContext::default());
    }

    #[tokio::test]
    async fn test_get_or_create_idempotent() {
        let store = SessionStore::new();
        let first = store.get_or_create("alpha");
        first.lock().await.context.last_customer_id = Some(7);

        let second = store.get_or_create("alpha");
        assert_eq!(second.lock().await.context.last_customer_id, Some(7));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_isolated_by_key() {
        let store = SessionStore::new();
        store
            .get_or_create("alpha")
            .lock()
            .await
            .context
            .last_customer_id = Some(1);

        let other = store.get_or_create("beta");
        assert!(other.lock().await.context.last_customer_id.is_none());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_same_key_serializes_turns() {
        let store = Arc::new(SessionStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let session = store.get_or_create("shared");
                let mut session = session.lock().await;
                session.history.push(ChatTurn::user(format!("msg {}", i)));
                tokio::task::yield_now().await;
                session.history.push(ChatTurn::assistant(format!("reply {}", i)));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Every turn appended a user+assistant pair atomically.
        let session = store.get_or_create("shared");
        let session = session.lock().await;
        assert_eq!(session.history.len(), 16);
        for pair in session.history.chunks(2) {
            assert_eq!(pair[0].role, helpdesk_llm::Role::User);
            assert_eq!(pair[1].role, helpdesk_llm::Role::Assistant);
        }
    }

    #[test]
    fn test_is_empty() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        store.get_or_create("x");
        assert!(!store.is_empty());
    }
}
