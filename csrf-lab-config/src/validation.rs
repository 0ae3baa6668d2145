//! Configuration validation.

use crate::{ConfigError, Result};

/// Implemented by configuration structs that have rules beyond their types.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reusable field checks.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(field, "cannot be empty"));
        }
        Ok(())
    }

    pub fn in_range<T: PartialOrd + std::fmt::Display>(
        value: T,
        min: T,
        max: T,
        field: &str,
    ) -> Result<()> {
        if value < min || value > max {
            return Err(ConfigError::invalid(
                field,
                format!("{} is outside {}..={}", value, min, max),
            ));
        }
        Ok(())
    }

    pub fn one_of(value: &str, allowed: &[&str], field: &str) -> Result<()> {
        if !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
            return Err(ConfigError::invalid(
                field,
                format!("must be one of {}", allowed.join(", ")),
            ));
        }
        Ok(())
    }

    /// Only requires an `@`; anything more belongs to the mail system.
    pub fn is_email(value: &str, field: &str) -> Result<()> {
        if !value.contains('@') {
            return Err(ConfigError::invalid(field, "must contain '@'"));
        }
        Ok(())
    }

    pub fn is_port(value: u16, field: &str) -> Result<()> {
        if value == 0 {
            return Err(ConfigError::invalid(field, "port 0 is not allowed"));
        }
        Ok(())
    }
}
