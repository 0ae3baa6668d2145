//! # csrf-lab CSRF protection
//!
//! The token half of the synchronizer-token pattern: random session ids and
//! tokens, the comparison used when a protected form comes back, and the
//! rotation policy applied after a token is accepted.
//!
//! ```rust
//! use csrf_lab_csrf::{CsrfConfig, CsrfGuard, generate_token};
//!
//! let guard = CsrfGuard::new(CsrfConfig::default());
//! let stored = generate_token();
//!
//! assert!(guard.verify(Some(&stored), &stored).is_ok());
//! assert!(guard.verify(Some("guess"), &stored).is_err());
//! assert!(guard.verify(None, &stored).is_err());
//! ```
//!
//! Tokens are compared with plain string equality unless
//! [`TokenComparison::ConstantTime`] is configured. Both give the same
//! verdicts; only the timing profile differs.

pub mod config;
pub mod error;
pub mod guard;
pub mod token;

pub use config::{CsrfConfig, TokenComparison};
pub use error::{CsrfError, Result};
pub use guard::CsrfGuard;
pub use token::{
    generate_session_id, generate_token, tokens_equal, tokens_equal_constant_time,
};
