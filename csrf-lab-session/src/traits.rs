//! Session store trait definition.

use crate::error::SessionResult;
use chrono::{DateTime, Utc};
use csrf_lab_csrf::CsrfGuard;

/// One authenticated browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Unique session identifier, also the cookie value
    pub id: String,
    /// Logged-in user
    pub user: String,
    /// Current anti-CSRF token
    pub csrf_token: String,
    /// Login time
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, user: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
            csrf_token: csrf_token.into(),
            created_at: Utc::now(),
        }
    }

    /// Login time as shown to the user, e.g. `2026-10-19 08:15:02 UTC`.
    pub fn login_time(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    /// First characters of the id, safe to put in logs.
    pub fn log_id(&self) -> &str {
        let end = self.id.len().min(8);
        self.id.get(..end).unwrap_or(&self.id)
    }
}

/// Storage for sessions.
///
/// Every method completes under a single lock acquisition in the provided
/// implementation, so callers never observe a half-applied change.
pub trait SessionStore: Send + Sync {
    /// Create and insert a session for `user` with a fresh id and token.
    fn create(&self, user: &str) -> Session;

    /// Get a session by id. Unknown ids are `None`, not an error.
    fn lookup(&self, session_id: &str) -> Option<Session>;

    /// Delete a session. Returns whether it existed; absence is not an error.
    fn remove(&self, session_id: &str) -> bool;

    /// Replace the session's CSRF token and return the new one.
    ///
    /// Returns `SessionError::NotFound` without touching the store when the
    /// session does not exist.
    fn rotate_token(&self, session_id: &str) -> SessionResult<String>;

    /// Check `submitted` against the session's token and, if it matches,
    /// rotate the token according to the guard's policy.
    ///
    /// Check and rotation happen atomically, so one token can be accepted at
    /// most once even under concurrent submissions.
    fn consume_token(
        &self,
        session_id: &str,
        submitted: Option<&str>,
        guard: &CsrfGuard,
    ) -> SessionResult<()>;

    /// Number of live sessions.
    fn count(&self) -> usize;

    /// Drop every session.
    fn clear(&self);
}
