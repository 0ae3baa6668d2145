//! Cookie building and parsing.
//!
//! Only the attributes the application actually emits are modelled:
//! `Path`, `HttpOnly`, `Secure`, `SameSite`, `Max-Age` and `Expires`.

use std::collections::HashMap;
use std::fmt;

/// Date used to expire a cookie immediately.
const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Cookie SameSite attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing cookie, rendered into a `Set-Cookie` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: Option<SameSite>,
    pub max_age: Option<i64>,
    pub expires: Option<String>,
}

impl Cookie {
    /// Create a session cookie (no expiry) with the given name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: Some("/".to_string()),
            http_only: false,
            secure: false,
            same_site: None,
            max_age: None,
            expires: None,
        }
    }

    /// A cookie that instructs the browser to drop `name` immediately.
    pub fn removal(name: impl Into<String>) -> Self {
        Self::new(name, "")
            .with_max_age(0)
            .with_expires(EPOCH_EXPIRES)
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn with_expires(mut self, expires: impl Into<String>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    /// Whether this cookie deletes itself on arrival.
    pub fn is_removal(&self) -> bool {
        self.max_age.is_some_and(|age| age <= 0)
    }

    /// Render the `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        let mut cookie = format!("{}={}", self.name, self.value);

        if let Some(ref expires) = self.expires {
            cookie.push_str(&format!("; Expires={}", expires));
        }

        if let Some(max_age) = self.max_age {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        if self.secure {
            cookie.push_str("; Secure");
        }

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }

        if let Some(ref path) = self.path {
            cookie.push_str(&format!("; Path={}", path));
        }

        if let Some(same_site) = self.same_site {
            cookie.push_str(&format!("; SameSite={}", same_site.as_str()));
        }

        cookie
    }

    /// Parse a `Set-Cookie` header value back into a cookie.
    ///
    /// Unknown attributes are ignored.
    pub fn parse_set_cookie(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        if name.is_empty() {
            return None;
        }

        let mut cookie = Cookie::new(name, value);
        cookie.path = None;

        for attr in parts {
            let attr = attr.trim();
            let (key, val) = attr.split_once('=').unwrap_or((attr, ""));
            match key.to_ascii_lowercase().as_str() {
                "path" => cookie.path = Some(val.to_string()),
                "httponly" => cookie.http_only = true,
                "secure" => cookie.secure = true,
                "max-age" => cookie.max_age = val.parse().ok(),
                "expires" => cookie.expires = Some(val.to_string()),
                "samesite" => {
                    cookie.same_site = match val.to_ascii_lowercase().as_str() {
                        "strict" => Some(SameSite::Strict),
                        "lax" => Some(SameSite::Lax),
                        "none" => Some(SameSite::None),
                        _ => None,
                    }
                }
                _ => {}
            }
        }

        Some(cookie)
    }
}

/// Parse a request `Cookie` header into name/value pairs.
///
/// The first occurrence of a name wins.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for pair in header.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            let name = name.trim();
            if !name.is_empty() {
                cookies
                    .entry(name.to_string())
                    .or_insert_with(|| value.trim().trim_matches('"').to_string());
            }
        }
    }
    cookies
}
