//! Error types for session operations.

use csrf_lab_csrf::CsrfError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No session with this id
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Submitted CSRF token did not match the session's token
    #[error(transparent)]
    Csrf(#[from] CsrfError),
}
