//! Integration tests for csrf-lab-session

use csrf_lab_core::{HttpMethod, HttpRequest, HttpResponse, SameSite};
use csrf_lab_csrf::{CsrfError, CsrfGuard};
use csrf_lab_session::*;
use std::sync::Arc;

fn request_with_cookie(config: &SessionConfig, id: &str) -> HttpRequest {
    HttpRequest::new(HttpMethod::POST, "/change-email-safe")
        .with_header("Cookie", format!("{}={}", config.cookie_name, id))
}

#[test]
fn test_login_cookie_resolves_back_to_session() {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let config = SessionConfig::default();

    let session = store.create(&config.user);
    let cookie = config.session_cookie(&session.id, login_same_site(Some("Strict")));
    let response = HttpResponse::redirect("/").with_cookie(&cookie);

    let issued = response.set_cookie().unwrap();
    assert_eq!(issued.same_site, Some(SameSite::Strict));

    let req = request_with_cookie(&config, &issued.value);
    let resolved = session_from_request(store.as_ref(), &config, &req).unwrap();
    assert_eq!(resolved.user, "alice");
}

#[test]
fn test_logout_invalidates_old_cookie() {
    let store = MemorySessionStore::new();
    let config = SessionConfig::default();
    let session = store.create("alice");

    store.remove(&session.id);

    let req = request_with_cookie(&config, &session.id);
    assert!(session_from_request(&store, &config, &req).is_none());
}

#[test]
fn test_token_belongs_to_one_session() {
    let store = MemorySessionStore::new();
    let guard = CsrfGuard::default();
    let victim = store.create("alice");
    let attacker = store.create("alice");

    let result = store.consume_token(&victim.id, Some(&attacker.csrf_token), &guard);
    assert_eq!(result, Err(SessionError::Csrf(CsrfError::InvalidToken)));
}

#[test]
fn test_consume_on_removed_session() {
    let store = MemorySessionStore::new();
    let guard = CsrfGuard::default();
    let session = store.create("alice");
    store.remove(&session.id);

    let result = store.consume_token(&session.id, Some(&session.csrf_token), &guard);
    assert!(matches!(result, Err(SessionError::NotFound(_))));
}
