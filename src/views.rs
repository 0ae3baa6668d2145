//! HTML pages rendered with handlebars.

use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const HOME: &str = "home";
pub const SAFE: &str = "safe";
pub const ATTACK: &str = "attack";
const NAV: &str = "nav";

const EMBEDDED: [(&str, &str); 3] = [
    (HOME, include_str!("../templates/home.hbs")),
    (SAFE, include_str!("../templates/safe.hbs")),
    (ATTACK, include_str!("../templates/attack.hbs")),
];
const EMBEDDED_NAV: &str = include_str!("../templates/nav.hbs");

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template directory not found: {0}")]
    MissingDir(PathBuf),

    #[error("Failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template parsing error: {0}")]
    Parse(String),

    #[error("Template rendering error: {0}")]
    Render(String),
}

impl From<handlebars::TemplateError> for ViewError {
    fn from(err: handlebars::TemplateError) -> Self {
        ViewError::Parse(err.to_string())
    }
}

impl From<handlebars::RenderError> for ViewError {
    fn from(err: handlebars::RenderError) -> Self {
        ViewError::Render(err.to_string())
    }
}

impl From<ViewError> for csrf_lab_core::Error {
    fn from(err: ViewError) -> Self {
        csrf_lab_core::Error::Internal(err.to_string())
    }
}

/// Data for the home page.
#[derive(Debug, Serialize)]
pub struct HomePage<'a> {
    pub title: &'a str,
    pub user: Option<&'a str>,
    pub email: &'a str,
}

/// Data for the protected form.
#[derive(Debug, Serialize)]
pub struct SafePage<'a> {
    pub title: &'a str,
    pub user: &'a str,
    pub logged_in_at: &'a str,
    pub email: &'a str,
    pub field_name: &'a str,
    pub token: &'a str,
    pub error: Option<&'a str>,
}

/// Data for the attacker page.
#[derive(Debug, Serialize)]
pub struct AttackPage<'a> {
    pub title: &'a str,
    pub target_email: &'a str,
}

/// Registered page templates.
#[derive(Debug)]
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    /// Templates compiled into the binary.
    pub fn new() -> Result<Self, ViewError> {
        let mut registry = Handlebars::new();
        registry.register_partial(NAV, EMBEDDED_NAV)?;
        for (name, source) in EMBEDDED {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    /// Built-in templates, with any `<name>.hbs` in `dir` taking precedence.
    pub fn with_overrides(dir: &Path) -> Result<Self, ViewError> {
        if !dir.is_dir() {
            return Err(ViewError::MissingDir(dir.to_path_buf()));
        }

        let mut views = Self::new()?;

        if let Some(nav) = read_override(dir, NAV)? {
            views.registry.register_partial(NAV, nav)?;
        }
        for (name, _) in EMBEDDED {
            if let Some(source) = read_override(dir, name)? {
                views.registry.register_template_string(name, source)?;
            }
        }
        Ok(views)
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, ViewError> {
        Ok(self.registry.render(template, data)?)
    }

    pub fn home(&self, page: &HomePage<'_>) -> Result<String, ViewError> {
        self.render(HOME, page)
    }

    pub fn safe(&self, page: &SafePage<'_>) -> Result<String, ViewError> {
        self.render(SAFE, page)
    }

    pub fn attack(&self, page: &AttackPage<'_>) -> Result<String, ViewError> {
        self.render(ATTACK, page)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

fn read_override(dir: &Path, name: &str) -> Result<Option<String>, ViewError> {
    let path = dir.join(format!("{}.hbs", name));
    if !path.is_file() {
        return Ok(None);
    }
    debug!(path = %path.display(), "loading template override");
    fs::read_to_string(&path)
        .map(Some)
        .map_err(|source| ViewError::Io { path, source })
}
