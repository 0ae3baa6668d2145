//! Application settings.

use csrf_lab_config::de::{lenient_path_option, lenient_string};
use csrf_lab_config::{ConfigError, ConfigManager, ConfigValidator, Validate};
use csrf_lab_core::logging::{LogConfig, LogFormat, LogLevel};
use csrf_lab_csrf::CsrfConfig;
use csrf_lab_session::SessionConfig;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `CSRF_LAB_PORT`.
pub const ENV_PREFIX: &str = "CSRF_LAB";

/// Variable naming an optional TOML or JSON settings file.
pub const CONFIG_FILE_VAR: &str = "CSRF_LAB_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(deserialize_with = "lenient_string")]
    pub host: String,
    pub port: u16,
    /// Email the shared state starts with
    #[serde(deserialize_with = "lenient_string")]
    pub default_email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub demo_user: String,
    pub cookie_secure: bool,
    pub constant_time_compare: bool,
    pub rotate_on_use: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub log_level: String,
    #[serde(deserialize_with = "lenient_string")]
    pub log_format: String,
    /// Directory whose `*.hbs` files replace the built-in templates
    #[serde(deserialize_with = "lenient_path_option")]
    pub template_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            default_email: "alice@example.com".to_string(),
            demo_user: "alice".to_string(),
            cookie_secure: false,
            constant_time_compare: false,
            rotate_on_use: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            template_dir: None,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> csrf_lab_config::Result<()> {
        ConfigValidator::not_empty(&self.host, "host")?;
        ConfigValidator::is_port(self.port, "port")?;
        ConfigValidator::is_email(&self.default_email, "default_email")?;
        ConfigValidator::not_empty(&self.demo_user, "demo_user")?;
        ConfigValidator::one_of(
            &self.log_level,
            &["trace", "debug", "info", "warn", "error"],
            "log_level",
        )?;
        ConfigValidator::one_of(&self.log_format, &["json", "pretty", "compact"], "log_format")?;
        Ok(())
    }
}

impl AppConfig {
    /// Load settings from the optional file, `.env` and `CSRF_LAB_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = ConfigManager::builder()
            .with_prefix(ENV_PREFIX)
            .load_dotenv(None);

        if let Ok(path) = std::env::var(CONFIG_FILE_VAR) {
            builder = builder.add_file(path);
        }

        Self::from_manager(&builder.build()?)
    }

    pub fn from_manager(manager: &ConfigManager) -> Result<Self, ConfigError> {
        manager.load_validated()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::invalid("host", format!("not an IP address: {}", self.host)))
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::new()
            .level(LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Info))
            .format(LogFormat::parse(&self.log_format).unwrap_or(LogFormat::Pretty))
    }

    pub fn csrf_config(&self) -> CsrfConfig {
        CsrfConfig::new()
            .with_constant_time(self.constant_time_compare)
            .with_rotate_on_use(self.rotate_on_use)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new()
            .with_secure(self.cookie_secure)
            .with_user(&self.demo_user)
    }
}
