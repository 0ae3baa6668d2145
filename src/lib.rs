// csrf-lab - a teaching server for cross-site request forgery
//
// Two endpoints change the same shared email address. One accepts a plain
// GET with nothing but the session cookie; the other requires a POST carrying
// the session's synchronizer token.

pub mod app;
pub mod config;
pub mod handlers;
pub mod state;
pub mod views;

pub use app::{StartupError, build_router, run};
pub use config::AppConfig;
pub use state::{AppContext, SharedEmail};
pub use views::{ViewError, Views};

// Re-export the workspace crates
pub use csrf_lab_config;
pub use csrf_lab_core;
pub use csrf_lab_csrf;
pub use csrf_lab_session;

/// Commonly used items
pub mod prelude {
    pub use crate::app::build_router;
    pub use crate::config::AppConfig;
    pub use crate::state::{AppContext, SharedEmail};
    pub use csrf_lab_core::testing::{TestClient, TestResponse};
    pub use csrf_lab_core::{Application, HttpRequest, HttpResponse, Router};
    pub use csrf_lab_csrf::{CsrfConfig, CsrfGuard};
    pub use csrf_lab_session::{MemorySessionStore, SessionConfig, SessionStore};
}
