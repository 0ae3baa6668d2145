use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Random bytes behind a session id (hex encoded, 32 chars).
pub const SESSION_ID_BYTES: usize = 16;

/// Random bytes behind a CSRF token (base64url encoded, 32 chars).
pub const TOKEN_BYTES: usize = 24;

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Generate a new session identifier.
///
/// Drawn from the thread-local CSPRNG independently of any token, so a
/// session id says nothing about the session's CSRF token.
pub fn generate_session_id() -> String {
    hex::encode(random_bytes::<SESSION_ID_BYTES>())
}

/// Generate a new anti-CSRF token.
pub fn generate_token() -> String {
    URL_SAFE_NO_PAD.encode(random_bytes::<TOKEN_BYTES>())
}

/// Plain string equality.
///
/// Short-circuits on the first differing byte, so the time taken leaks how
/// much of a guess was right. Prefer [`tokens_equal_constant_time`] outside
/// the classroom.
pub fn tokens_equal(submitted: &str, expected: &str) -> bool {
    submitted == expected
}

/// Equality that inspects every byte of equal-length inputs.
pub fn tokens_equal_constant_time(submitted: &str, expected: &str) -> bool {
    if submitted.len() != expected.len() {
        return false;
    }

    let mut diff = 0u8;
    for (a, b) in submitted.bytes().zip(expected.bytes()) {
        diff |= a ^ b;
    }
    diff == 0
}
