//! Session cookie configuration.

use csrf_lab_core::{Cookie, SameSite};

/// Name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "csrf_demo_session";

/// User every login authenticates as.
pub const DEFAULT_USER: &str = "alice";

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Cookie carrying the session id
    pub cookie_name: String,
    /// Cookie path
    pub cookie_path: String,
    /// Hide the cookie from scripts
    pub http_only: bool,
    /// Only send the cookie over HTTPS
    pub secure: bool,
    /// User assigned to new sessions
    pub user: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_path: "/".to_string(),
            http_only: true,
            secure: false,
            user: DEFAULT_USER.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Cookie that binds the browser to `session_id`.
    ///
    /// No `Max-Age` or `Expires`: it lives until the browser closes.
    pub fn session_cookie(&self, session_id: &str, same_site: SameSite) -> Cookie {
        Cookie::new(&self.cookie_name, session_id)
            .with_path(&self.cookie_path)
            .with_http_only(self.http_only)
            .with_secure(self.secure)
            .with_same_site(same_site)
    }

    /// Cookie that clears the session cookie on logout.
    pub fn removal_cookie(&self) -> Cookie {
        Cookie::removal(&self.cookie_name).with_path(&self.cookie_path)
    }
}

/// SameSite mode requested at login.
///
/// Only the exact strings `Lax` and `Strict` are honoured; anything else,
/// including other casings, `None` and a missing value, falls back to `Lax`.
pub fn login_same_site(requested: Option<&str>) -> SameSite {
    match requested {
        Some("Strict") => SameSite::Strict,
        _ => SameSite::Lax,
    }
}
