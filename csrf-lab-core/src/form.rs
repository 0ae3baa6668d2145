//! URL-encoded form and query string decoding

use crate::Error;
use std::collections::HashMap;

/// Parse URL-encoded form data into a HashMap
///
/// When a key repeats, the first value is kept.
pub fn parse_form_map(body: &[u8]) -> Result<HashMap<String, String>, Error> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| Error::BadRequest(format!("Failed to parse form data: {}", e)))?;

    Ok(first_wins(pairs))
}

/// Decode a raw query string (without the leading `?`).
///
/// Malformed input never fails a request; it yields no parameters.
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .map(first_wins)
        .unwrap_or_default()
}

fn first_wins(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        map.entry(key).or_insert(value);
    }
    map
}
