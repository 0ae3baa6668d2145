//! Shared application state handed to every handler.

use crate::config::AppConfig;
use crate::views::{ViewError, Views};
use csrf_lab_csrf::CsrfGuard;
use csrf_lab_session::{MemorySessionStore, SessionConfig, SessionStore};
use parking_lot::RwLock;
use std::sync::Arc;

/// The one mutable record every session can change.
#[derive(Debug)]
pub struct SharedEmail {
    email: RwLock<String>,
}

impl SharedEmail {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            email: RwLock::new(initial.into()),
        }
    }

    pub fn get(&self) -> String {
        self.email.read().clone()
    }

    /// Store the trimmed `candidate` unless it is blank.
    ///
    /// Returns the stored value, or `None` when nothing changed.
    pub fn set_if_nonblank(&self, candidate: Option<&str>) -> Option<String> {
        let trimmed = candidate.map(str::trim).filter(|s| !s.is_empty())?;
        let mut email = self.email.write();
        *email = trimmed.to_string();
        Some(email.clone())
    }
}

/// Everything a handler needs, built once at startup.
pub struct AppContext {
    pub sessions: Arc<dyn SessionStore>,
    pub email: SharedEmail,
    pub session_config: SessionConfig,
    pub guard: CsrfGuard,
    pub views: Views,
}

impl AppContext {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        email: SharedEmail,
        session_config: SessionConfig,
        guard: CsrfGuard,
        views: Views,
    ) -> Self {
        Self {
            sessions,
            email,
            session_config,
            guard,
            views,
        }
    }

    /// Build a context with an empty in-memory session store.
    pub fn from_config(config: &AppConfig) -> Result<Self, ViewError> {
        let views = match config.template_dir {
            Some(ref dir) => Views::with_overrides(dir)?,
            None => Views::new()?,
        };

        Ok(Self::new(
            Arc::new(MemorySessionStore::new()),
            SharedEmail::new(&config.default_email),
            config.session_config(),
            CsrfGuard::new(config.csrf_config()),
            views,
        ))
    }
}
