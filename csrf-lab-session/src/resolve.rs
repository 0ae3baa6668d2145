//! Mapping an incoming request to its session.

use crate::config::SessionConfig;
use crate::traits::{Session, SessionStore};
use csrf_lab_core::HttpRequest;

/// Look up the session named by a cookie value.
///
/// A missing cookie and an unknown id are the same thing: no session.
pub fn resolve_session(store: &dyn SessionStore, cookie_value: Option<&str>) -> Option<Session> {
    match cookie_value {
        Some(id) if !id.is_empty() => store.lookup(id),
        _ => None,
    }
}

/// Look up the session for a request using the configured cookie name.
pub fn session_from_request(
    store: &dyn SessionStore,
    config: &SessionConfig,
    request: &HttpRequest,
) -> Option<Session> {
    let cookie = request.cookie(&config.cookie_name);
    resolve_session(store, cookie.as_deref())
}
