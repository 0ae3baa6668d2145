//! In-process session store.

use crate::error::{SessionError, SessionResult};
use crate::traits::{Session, SessionStore};
use csrf_lab_csrf::{CsrfGuard, generate_session_id, generate_token};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

/// Session store backed by a `HashMap` behind a read-write lock.
///
/// Sessions live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&self, user: &str) -> Session {
        let mut sessions = self.sessions.write();

        let mut id = generate_session_id();
        while sessions.contains_key(&id) {
            id = generate_session_id();
        }

        let session = Session::new(id.clone(), user, generate_token());
        sessions.insert(id, session.clone());

        info!(session = session.log_id(), user, "session created");
        session
    }

    fn lookup(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().get(session_id).cloned()
    }

    fn remove(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().remove(session_id).is_some();
        if removed {
            info!(session = short(session_id), "session removed");
        }
        removed
    }

    fn rotate_token(&self, session_id: &str) -> SessionResult<String> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(short(session_id).to_string()))?;

        session.csrf_token = generate_token();
        debug!(session = session.log_id(), "csrf token rotated");
        Ok(session.csrf_token.clone())
    }

    fn consume_token(
        &self,
        session_id: &str,
        submitted: Option<&str>,
        guard: &CsrfGuard,
    ) -> SessionResult<()> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(short(session_id).to_string()))?;

        guard.verify(submitted, &session.csrf_token)?;

        if let Some(next) = guard.next_token() {
            session.csrf_token = next;
            debug!(session = session.log_id(), "csrf token rotated after use");
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.sessions.read().len()
    }

    fn clear(&self) {
        self.sessions.write().clear();
    }
}

fn short(session_id: &str) -> &str {
    session_id.get(..8).unwrap_or(session_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csrf_lab_csrf::{CsrfConfig, CsrfError};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_create_and_lookup() {
        let store = MemorySessionStore::new();
        let session = store.create("alice");

        assert_eq!(session.id.len(), 32);
        assert_eq!(session.csrf_token.len(), 32);
        assert_eq!(session.user, "alice");
        assert_ne!(session.id, session.csrf_token);

        assert_eq!(store.lookup(&session.id), Some(session));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let store = MemorySessionStore::new();
        assert!(store.lookup("nope").is_none());
        assert!(store.lookup("").is_none());
    }

    #[test]
    fn test_sessions_are_distinct() {
        let store = MemorySessionStore::new();
        let a = store.create("alice");
        let b = store.create("alice");

        assert_ne!(a.id, b.id);
        assert_ne!(a.csrf_token, b.csrf_token);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = MemorySessionStore::new();
        let session = store.create("alice");

        assert!(store.remove(&session.id));
        assert!(!store.remove(&session.id));
        assert!(!store.remove("never-existed"));
        assert!(store.lookup(&session.id).is_none());
    }

    #[test]
    fn test_rotate_token() {
        let store = MemorySessionStore::new();
        let session = store.create("alice");

        let rotated = store.rotate_token(&session.id).unwrap();
        assert_ne!(rotated, session.csrf_token);
        assert_eq!(store.lookup(&session.id).unwrap().csrf_token, rotated);
    }

    #[test]
    fn test_rotate_token_unknown_session() {
        let store = MemorySessionStore::new();
        let err = store.rotate_token("missing").unwrap_err();

        assert!(matches!(err, SessionError::NotFound(_)));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_consume_token_rotates() {
        let store = MemorySessionStore::new();
        let guard = CsrfGuard::default();
        let session = store.create("alice");

        store
            .consume_token(&session.id, Some(&session.csrf_token), &guard)
            .unwrap();

        let after = store.lookup(&session.id).unwrap();
        assert_ne!(after.csrf_token, session.csrf_token);

        let replay = store.consume_token(&session.id, Some(&session.csrf_token), &guard);
        assert_eq!(replay, Err(SessionError::Csrf(CsrfError::InvalidToken)));
    }

    #[test]
    fn test_consume_token_mismatch_keeps_token() {
        let store = MemorySessionStore::new();
        let guard = CsrfGuard::default();
        let session = store.create("alice");

        assert_eq!(
            store.consume_token(&session.id, None, &guard),
            Err(SessionError::Csrf(CsrfError::MissingToken))
        );
        assert!(store.consume_token(&session.id, Some("forged"), &guard).is_err());
        assert_eq!(
            store.lookup(&session.id).unwrap().csrf_token,
            session.csrf_token
        );
    }

    #[test]
    fn test_consume_token_without_rotation() {
        let store = MemorySessionStore::new();
        let guard = CsrfGuard::new(CsrfConfig::new().with_rotate_on_use(false));
        let session = store.create("alice");

        for _ in 0..2 {
            store
                .consume_token(&session.id, Some(&session.csrf_token), &guard)
                .unwrap();
        }
        assert_eq!(
            store.lookup(&session.id).unwrap().csrf_token,
            session.csrf_token
        );
    }

    #[test]
    fn test_consume_token_accepted_once_across_threads() {
        let store = Arc::new(MemorySessionStore::new());
        let guard = CsrfGuard::default();
        let session = store.create("alice");
        let accepted = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let guard = guard.clone();
                let accepted = Arc::clone(&accepted);
                let id = session.id.clone();
                let token = session.csrf_token.clone();
                std::thread::spawn(move || {
                    if store.consume_token(&id, Some(&token), &guard).is_ok() {
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(accepted.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear() {
        let store = MemorySessionStore::new();
        store.create("alice");
        store.create("bob");
        store.clear();
        assert_eq!(store.count(), 0);
    }
}
