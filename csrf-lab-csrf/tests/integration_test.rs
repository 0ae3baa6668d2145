//! Integration tests for csrf-lab-csrf

use csrf_lab_core::{HttpMethod, HttpRequest};
use csrf_lab_csrf::*;

#[test]
fn test_guard_accepts_form_token() {
    let guard = CsrfGuard::default();
    let stored = generate_token();

    let req = HttpRequest::new(HttpMethod::POST, "/change-email-safe")
        .with_body(format!("email=new%40example.com&csrf_token={}", stored));

    let submitted = guard.token_from_form(&req);
    assert!(guard.verify(submitted.as_deref(), &stored).is_ok());
}

#[test]
fn test_guard_rejects_other_sessions_token() {
    let guard = CsrfGuard::default();
    let mine = generate_token();
    let theirs = generate_token();

    assert_eq!(
        guard.verify(Some(&theirs), &mine),
        Err(CsrfError::InvalidToken)
    );
}

#[test]
fn test_session_id_is_not_a_token() {
    let guard = CsrfGuard::default();
    let id = generate_session_id();
    let token = generate_token();

    assert_ne!(id, token);
    assert!(guard.verify(Some(&id), &token).is_err());
}

#[test]
fn test_rotated_token_rejects_previous() {
    let guard = CsrfGuard::default();
    let old = generate_token();
    let new = guard.next_token().unwrap();

    assert!(!tokens_equal(&old, &new));
    assert!(guard.verify(Some(&old), &new).is_err());
    assert!(guard.verify(Some(&new), &new).is_ok());
}

#[test]
fn test_user_message_is_shared() {
    assert_eq!(CsrfError::MissingToken.user_message(), "Bad or missing CSRF token");
    assert_eq!(
        CsrfError::InvalidToken.user_message(),
        CsrfError::MissingToken.user_message()
    );
}
