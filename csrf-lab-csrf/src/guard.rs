use crate::config::{CsrfConfig, TokenComparison};
use crate::error::{CsrfError, Result};
use crate::token::{generate_token, tokens_equal, tokens_equal_constant_time};
use csrf_lab_core::HttpRequest;
use std::sync::Arc;
use tracing::debug;

/// Synchronizer-token check for state-changing form posts
#[derive(Debug, Clone)]
pub struct CsrfGuard {
    config: Arc<CsrfConfig>,
}

impl CsrfGuard {
    pub fn new(config: CsrfConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &CsrfConfig {
        &self.config
    }

    /// Name of the hidden form field views must render
    pub fn field_name(&self) -> &str {
        &self.config.field_name
    }

    /// Get the submitted token from a URL-encoded request body
    ///
    /// An unparsable body counts as no token.
    pub fn token_from_form(&self, request: &HttpRequest) -> Option<String> {
        request
            .form()
            .ok()
            .and_then(|mut form| form.remove(&self.config.field_name))
    }

    /// Compare a submitted token with the session's stored token
    pub fn verify(&self, submitted: Option<&str>, expected: &str) -> Result<()> {
        let submitted = match submitted {
            Some(token) if !token.is_empty() => token,
            _ => {
                debug!("csrf token missing from submission");
                return Err(CsrfError::MissingToken);
            }
        };

        let equal = match self.config.comparison {
            TokenComparison::Naive => tokens_equal(submitted, expected),
            TokenComparison::ConstantTime => tokens_equal_constant_time(submitted, expected),
        };

        if equal {
            Ok(())
        } else {
            debug!("csrf token mismatch");
            Err(CsrfError::InvalidToken)
        }
    }

    /// Token that should replace one that was just accepted, if rotation is on
    pub fn next_token(&self) -> Option<String> {
        self.config.rotate_on_use.then(generate_token)
    }
}

impl Default for CsrfGuard {
    fn default() -> Self {
        Self::new(CsrfConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csrf_lab_core::HttpMethod;

    fn form_request(body: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::POST, "/change-email-safe").with_body(body)
    }

    #[test]
    fn test_token_from_form() {
        let guard = CsrfGuard::default();
        let req = form_request("email=a%40b.c&csrf_token=tok-123");
        assert_eq!(guard.token_from_form(&req), Some("tok-123".to_string()));
    }

    #[test]
    fn test_token_from_form_missing_field() {
        let guard = CsrfGuard::default();
        assert_eq!(guard.token_from_form(&form_request("email=a%40b.c")), None);
        assert_eq!(guard.token_from_form(&form_request("")), None);
    }

    #[test]
    fn test_token_from_unreadable_body() {
        let guard = CsrfGuard::default();
        let req = HttpRequest::new(HttpMethod::POST, "/change-email-safe")
            .with_body(vec![0xff, 0xfe, b'=', b'%', b'z']);
        assert_eq!(guard.token_from_form(&req), None);
    }

    #[test]
    fn test_custom_field_name() {
        let guard = CsrfGuard::new(CsrfConfig::new().with_field_name("_csrf"));
        let req = form_request("_csrf=xyz&csrf_token=ignored");
        assert_eq!(guard.token_from_form(&req), Some("xyz".to_string()));
        assert_eq!(guard.field_name(), "_csrf");
    }

    #[test]
    fn test_verify_outcomes() {
        let guard = CsrfGuard::default();
        assert_eq!(guard.verify(Some("t"), "t"), Ok(()));
        assert_eq!(guard.verify(Some("u"), "t"), Err(CsrfError::InvalidToken));
        assert_eq!(guard.verify(None, "t"), Err(CsrfError::MissingToken));
        assert_eq!(guard.verify(Some(""), "t"), Err(CsrfError::MissingToken));
    }

    #[test]
    fn test_verify_constant_time_same_verdicts() {
        let guard = CsrfGuard::new(CsrfConfig::new().with_constant_time(true));
        assert!(guard.verify(Some("token"), "token").is_ok());
        assert!(guard.verify(Some("tokem"), "token").is_err());
        assert!(guard.verify(Some("tok"), "token").is_err());
    }

    #[test]
    fn test_next_token_respects_rotation() {
        assert!(CsrfGuard::default().next_token().is_some());

        let fixed = CsrfGuard::new(CsrfConfig::new().with_rotate_on_use(false));
        assert!(fixed.next_token().is_none());
    }
}
