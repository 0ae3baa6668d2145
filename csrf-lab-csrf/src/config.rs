/// How a submitted token is compared with the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenComparison {
    /// Ordinary string equality
    #[default]
    Naive,
    /// Byte-by-byte comparison with no early exit
    ConstantTime,
}

/// CSRF protection configuration
#[derive(Debug, Clone)]
pub struct CsrfConfig {
    /// Form field carrying the token
    pub field_name: String,

    /// Comparison strategy
    pub comparison: TokenComparison,

    /// Replace the session's token after every accepted submission
    pub rotate_on_use: bool,
}

impl CsrfConfig {
    pub fn new() -> Self {
        Self {
            field_name: "csrf_token".to_string(),
            comparison: TokenComparison::Naive,
            rotate_on_use: true,
        }
    }

    /// Set field name
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Set comparison strategy
    pub fn with_comparison(mut self, comparison: TokenComparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Shorthand for `with_comparison(TokenComparison::ConstantTime)` when `enabled`
    pub fn with_constant_time(self, enabled: bool) -> Self {
        self.with_comparison(if enabled {
            TokenComparison::ConstantTime
        } else {
            TokenComparison::Naive
        })
    }

    /// Set token rotation
    pub fn with_rotate_on_use(mut self, rotate: bool) -> Self {
        self.rotate_on_use = rotate;
        self
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CsrfConfig::default();
        assert_eq!(config.field_name, "csrf_token");
        assert_eq!(config.comparison, TokenComparison::Naive);
        assert!(config.rotate_on_use);
    }

    #[test]
    fn test_config_builder() {
        let config = CsrfConfig::new()
            .with_field_name("_csrf")
            .with_constant_time(true)
            .with_rotate_on_use(false);

        assert_eq!(config.field_name, "_csrf");
        assert_eq!(config.comparison, TokenComparison::ConstantTime);
        assert!(!config.rotate_on_use);
    }
}
