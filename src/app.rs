//! Router assembly and server startup.

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppContext;
use crate::views::ViewError;
use csrf_lab_config::ConfigError;
use csrf_lab_core::{Application, Error, HttpRequest, HttpResponse, Router};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Failures that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Server(#[from] Error),
}

/// Close a handler over the shared context.
fn with_ctx<F, Fut>(
    ctx: &Arc<AppContext>,
    handler: F,
) -> impl Fn(HttpRequest) -> Fut + Send + Sync + 'static
where
    F: Fn(Arc<AppContext>, HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    let ctx = Arc::clone(ctx);
    move |req| handler(Arc::clone(&ctx), req)
}

/// Register every route.
pub fn build_router(ctx: Arc<AppContext>) -> Result<Router, Error> {
    let mut router = Router::new();

    router.get("/", with_ctx(&ctx, handlers::index))?;
    router.get("/login", with_ctx(&ctx, handlers::login))?;
    router.get("/logout", with_ctx(&ctx, handlers::logout))?;
    router.get("/change-email", with_ctx(&ctx, handlers::change_email_unsafe))?;
    router.get("/safe", with_ctx(&ctx, handlers::safe_form))?;
    router.post("/change-email-safe", with_ctx(&ctx, handlers::change_email_safe))?;
    router.get("/attack", with_ctx(&ctx, handlers::attack))?;

    Ok(router)
}

/// Build the application from `config` and serve until Ctrl-C.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let addr = config.socket_addr()?;
    let ctx = Arc::new(AppContext::from_config(&config)?);
    let router = build_router(ctx)?;

    info!(
        %addr,
        routes = router.len(),
        cookie_secure = config.cookie_secure,
        constant_time_compare = config.constant_time_compare,
        rotate_on_use = config.rotate_on_use,
        "starting csrf-lab"
    );

    Application::new(router).listen(addr).await?;
    Ok(())
}
