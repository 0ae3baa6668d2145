// In-process test client

use crate::application::dispatch;
use crate::cookie::Cookie;
use crate::{HttpMethod, HttpRequest, HttpResponse, Router};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Drives a `Router` without opening sockets.
///
/// Behaves like a browser that only ever talks to one site: cookies set by
/// responses are stored and sent back on later requests, removal cookies
/// delete them. Redirects are not followed.
pub struct TestClient {
    router: Arc<Router>,
    jar: Mutex<BTreeMap<String, String>>,
}

impl TestClient {
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            jar: Mutex::new(BTreeMap::new()),
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(HttpRequest::new(HttpMethod::GET, path)).await
    }

    /// Make a POST request with a URL-encoded form body
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).unwrap_or_default();
        let request = HttpRequest::new(HttpMethod::POST, path)
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body(body);
        self.send(request).await
    }

    /// Send a request, attaching stored cookies unless the request
    /// already carries a `Cookie` header.
    pub async fn send(&self, mut request: HttpRequest) -> TestResponse {
        if request.header("cookie").is_none() {
            if let Some(header) = self.cookie_header() {
                request.headers.insert("cookie".to_string(), header);
            }
        }

        let response = dispatch(&self.router, request).await;

        if let Some(cookie) = response.set_cookie() {
            let mut jar = self.jar.lock();
            if cookie.is_removal() {
                jar.remove(&cookie.name);
            } else {
                jar.insert(cookie.name.clone(), cookie.value.clone());
            }
        }

        TestResponse { response }
    }

    /// Current value of a stored cookie
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.jar.lock().get(name).cloned()
    }

    /// Store a cookie as if a response had set it
    pub fn set_cookie(&self, name: &str, value: &str) {
        self.jar.lock().insert(name.to_string(), value.to_string());
    }

    pub fn clear_cookies(&self) {
        self.jar.lock().clear();
    }

    fn cookie_header(&self) -> Option<String> {
        let jar = self.jar.lock();
        if jar.is_empty() {
            return None;
        }
        Some(
            jar.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub response: HttpResponse,
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.response.body).into_owned()
    }

    pub fn header(&self, key: &str) -> Option<&String> {
        self.response.headers.get(key)
    }

    pub fn location(&self) -> Option<&str> {
        self.response.location()
    }

    pub fn set_cookie(&self) -> Option<Cookie> {
        self.response.set_cookie()
    }

    /// Assert a redirect to `location` and return self
    pub fn assert_redirect(&self, location: &str) -> &Self {
        assert!(
            self.response.is_redirect(),
            "expected redirect to {}, got status {}",
            location,
            self.status()
        );
        assert_eq!(self.location(), Some(location));
        self
    }
}
