//! Layered configuration for csrf-lab.
//!
//! Values are collected into one flat JSON map. Later layers overwrite
//! earlier ones, and the result is deserialized into a typed struct and
//! checked with [`Validate`].
//!
//! ```
//! use csrf_lab_config::ConfigManager;
//!
//! let manager = ConfigManager::with_prefix("DEMO");
//! manager.load_env_from(vec![("DEMO_PORT".to_string(), "8080".to_string())]);
//! assert_eq!(manager.get_int("port").unwrap(), 8080);
//! ```

pub mod de;
pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Main configuration manager
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<Map<String, Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Overlay prefixed variables from the process environment.
    pub fn load_env(&self) {
        let vars = EnvLoader::new(self.env_prefix.clone()).load();
        self.overlay(vars);
    }

    /// Overlay prefixed variables from explicit pairs.
    pub fn load_env_from<I>(&self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = EnvLoader::new(self.env_prefix.clone()).load_from(vars);
        self.overlay(vars);
    }

    /// Load a `.env` file into the process environment, then overlay it.
    ///
    /// Without an explicit path a missing `.env` is ignored.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path)?;
            }
            None => {
                if let Ok(found) = dotenvy::dotenv() {
                    debug!(path = %found.display(), "loaded .env");
                }
            }
        }
        self.load_env();
        Ok(())
    }

    /// Overlay a JSON or TOML file, format chosen by extension.
    pub fn load_file(&self, path: &Path) -> Result<()> {
        let data = ConfigLoader::auto(path)?.load_file(path)?;
        if let Value::Object(map) = data {
            debug!(path = %path.display(), keys = map.len(), "loaded config file");
            self.overlay(map);
        }
        Ok(())
    }

    fn overlay<I>(&self, values: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.config.write().extend(values);
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.config.write().insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .config
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.config.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.config.read().keys().cloned().collect()
    }

    /// Copy every value from `other` over this manager's values.
    pub fn merge(&self, other: &ConfigManager) {
        let theirs = other.config.read().clone();
        self.overlay(theirs);
    }

    /// Deserialize everything loaded so far into `T` and validate it.
    ///
    /// Keys `T` does not know are ignored, so unrelated prefixed variables
    /// do not break startup.
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let snapshot = Value::Object(self.config.read().clone());

        let validated: T = serde_json::from_value(snapshot)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;

        validated.validate()?;
        Ok(validated)
    }
}

/// Builder that applies layers in a fixed order: files, then `.env`, then
/// the process environment.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    prefix: Option<String>,
    files: Vec<PathBuf>,
    dotenv: bool,
    dotenv_path: Option<PathBuf>,
    env: bool,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn add_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.dotenv = true;
        self.dotenv_path = path;
        self
    }

    pub fn load_env(mut self) -> Self {
        self.env = true;
        self
    }

    pub fn build(self) -> Result<ConfigManager> {
        let manager = match self.prefix {
            Some(prefix) => ConfigManager::with_prefix(prefix),
            None => ConfigManager::new(),
        };

        for file in &self.files {
            manager.load_file(file)?;
        }

        if self.dotenv {
            manager.load_dotenv(self.dotenv_path.as_deref())?;
        } else if self.env {
            manager.load_env();
        }

        Ok(manager)
    }
}
