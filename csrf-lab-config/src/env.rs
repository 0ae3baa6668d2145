//! Environment variable loading.

use crate::{ConfigError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::env;

/// Reads `PREFIX_*` variables into lowercase config keys.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load matching variables from the process environment.
    pub fn load(&self) -> HashMap<String, Value> {
        self.load_from(env::vars())
    }

    /// Load matching variables from an explicit list of pairs.
    ///
    /// With a prefix of `CSRF_LAB`, `CSRF_LAB_PORT=8080` becomes `port = 8080`.
    /// Variables that only share leading characters with the prefix, such as
    /// `CSRF_LABS_X`, are skipped.
    pub fn load_from<I>(&self, vars: I) -> HashMap<String, Value>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| {
                let key = match self.prefix {
                    Some(ref prefix) => key.strip_prefix(prefix)?.strip_prefix('_')?.to_string(),
                    None => key,
                };
                if key.is_empty() {
                    return None;
                }
                Some((key.to_lowercase(), coerce(&value)))
            })
            .collect()
    }

    /// Load a single variable, with the prefix applied.
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    fn full_key(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

/// Turn raw environment text into the closest JSON value.
///
/// Digits become a number only when the number prints back the same, so
/// text such as `007` stays a string.
pub fn coerce(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match trimmed.parse::<i64>() {
            Ok(n) if n.to_string() == trimmed => Value::from(n),
            _ => Value::String(raw.to_string()),
        },
    }
}
