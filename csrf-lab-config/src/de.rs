//! Field deserializers for values that arrive as untyped text.
//!
//! Environment variables are coerced to booleans and integers before
//! deserialization, so a string field can receive `1234` or `true`.
//! Use these with `#[serde(deserialize_with = "...")]` on such fields.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

/// Accept any scalar and keep its text form.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(|value| value.to_string())
}

/// Like [`lenient_string`], for an optional path.
pub fn lenient_path_option<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer)
        .map(|value| value.map(|value| PathBuf::from(value.to_string())))
}
