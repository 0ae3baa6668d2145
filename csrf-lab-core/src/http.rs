// HTTP request and response types

use crate::cookie::{Cookie, parse_cookie_header};
use crate::form::parse_form_map;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// HTTP methods the router dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP request wrapper
///
/// Header names are stored lowercase.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub path_params: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            body: Vec::new(),
            path_params: HashMap::new(),
            query_params: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_ascii_lowercase())
    }

    /// Get a path parameter by name
    pub fn param(&self, name: &str) -> Option<&String> {
        self.path_params.get(name)
    }

    /// Get a query parameter by name
    pub fn query(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    /// Get a request cookie by name
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.header("cookie")
            .and_then(|raw| parse_cookie_header(raw).remove(name))
    }

    /// Decode the body as `application/x-www-form-urlencoded`
    pub fn form(&self) -> Result<HashMap<String, String>, crate::Error> {
        parse_form_map(&self.body)
    }
}

/// HTTP response wrapper
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn bad_request() -> Self {
        Self::new(400)
    }

    pub fn not_found() -> Self {
        Self::new(404)
    }

    pub fn internal_server_error() -> Self {
        Self::new(500)
    }

    /// `200 OK` with an HTML body
    pub fn html(body: impl Into<String>) -> Self {
        Self::ok()
            .with_header("Content-Type".to_string(), "text/html; charset=utf-8".to_string())
            .with_body(body.into().into_bytes())
    }

    /// `302 Found` pointing at `location`
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::new(302).with_header("Location".to_string(), location.into())
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, crate::Error> {
        self.body =
            serde_json::to_vec(value).map_err(|e| crate::Error::Serialization(e.to_string()))?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn with_cookie(self, cookie: &Cookie) -> Self {
        self.with_header("Set-Cookie".to_string(), cookie.to_header_value())
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get("Location").map(String::as_str)
    }

    pub fn set_cookie(&self) -> Option<Cookie> {
        self.headers
            .get("Set-Cookie")
            .and_then(|raw| Cookie::parse_set_cookie(raw))
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::SameSite;

    #[test]
    fn test_method_round_trip_names() {
        assert_eq!(HttpMethod::from_str("post"), Some(HttpMethod::POST));
        assert_eq!(HttpMethod::from_str("BREW"), None);
        assert_eq!(HttpMethod::GET.to_string(), "GET");
    }

    #[test]
    fn test_request_cookie_lookup() {
        let req = HttpRequest::new(HttpMethod::GET, "/")
            .with_header("Cookie", "theme=dark; csrf_demo_session=s1");
        assert_eq!(req.cookie("csrf_demo_session"), Some("s1".to_string()));
        assert_eq!(req.cookie("missing"), None);
    }

    #[test]
    fn test_request_without_cookie_header() {
        let req = HttpRequest::new(HttpMethod::GET, "/");
        assert_eq!(req.cookie("csrf_demo_session"), None);
    }

    #[test]
    fn test_request_header_case_insensitive() {
        let req = HttpRequest::new(HttpMethod::GET, "/").with_header("X-Test", "1");
        assert_eq!(req.header("x-test"), Some(&"1".to_string()));
        assert_eq!(req.header("X-TEST"), Some(&"1".to_string()));
    }

    #[test]
    fn test_request_form() {
        let req = HttpRequest::new(HttpMethod::POST, "/change-email-safe")
            .with_body("email=x%40y.z&csrf_token=abc");
        let form = req.form().unwrap();
        assert_eq!(form.get("email"), Some(&"x@y.z".to_string()));
    }

    #[test]
    fn test_html_response() {
        let response = HttpResponse::html("<h1>Hi</h1>");
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type"),
            Some(&"text/html; charset=utf-8".to_string())
        );
        assert_eq!(response.body, b"<h1>Hi</h1>".to_vec());
    }

    #[test]
    fn test_redirect_with_cookie() {
        let cookie = Cookie::new("sid", "abc")
            .with_http_only(true)
            .with_same_site(SameSite::Strict);
        let response = HttpResponse::redirect("/").with_cookie(&cookie);

        assert_eq!(response.status, 302);
        assert!(response.is_redirect());
        assert_eq!(response.location(), Some("/"));
        assert_eq!(response.set_cookie(), Some(cookie.with_path("/")));
    }

    #[test]
    fn test_bad_request_with_status_override() {
        let response = HttpResponse::html("oops").with_status(400);
        assert_eq!(response.status, 400);
        assert!(!response.is_redirect());
    }
}
