//! Server-side sessions for csrf-lab.
//!
//! A session ties a browser cookie to a user and to the CSRF token that the
//! protected forms must echo back. Sessions are kept in memory and vanish
//! when the process exits.
//!
//! ```
//! use csrf_lab_csrf::CsrfGuard;
//! use csrf_lab_session::{MemorySessionStore, SessionStore};
//!
//! let store = MemorySessionStore::new();
//! let guard = CsrfGuard::default();
//! let session = store.create("alice");
//!
//! store
//!     .consume_token(&session.id, Some(&session.csrf_token), &guard)
//!     .unwrap();
//! assert!(store
//!     .consume_token(&session.id, Some(&session.csrf_token), &guard)
//!     .is_err());
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod resolve;
pub mod traits;

pub use config::{DEFAULT_COOKIE_NAME, DEFAULT_USER, SessionConfig, login_same_site};
pub use error::{SessionError, SessionResult};
pub use memory::MemorySessionStore;
pub use resolve::{resolve_session, session_from_request};
pub use traits::{Session, SessionStore};
