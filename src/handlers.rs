//! Route handlers.
//!
//! `/change-email` is deliberately unprotected: it mutates state on a GET
//! and trusts the session cookie alone. `/change-email-safe` is the same
//! mutation behind a POST and a per-session token.

use crate::state::AppContext;
use crate::views::{AttackPage, HomePage, SafePage};
use csrf_lab_core::{Error, HttpRequest, HttpResponse};
use csrf_lab_session::{Session, SessionError, login_same_site, session_from_request};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const HOME_TITLE: &str = "CSRF: vulnerable";
pub const SAFE_TITLE: &str = "CSRF: mitigated";
pub const ATTACK_TITLE: &str = "Totally harmless cat pictures";

/// Email the attacker page tries to plant.
pub const ATTACKER_EMAIL: &str = "attacker@evil.example";

fn current_session(ctx: &AppContext, req: &HttpRequest) -> Option<Session> {
    session_from_request(ctx.sessions.as_ref(), &ctx.session_config, req)
}

fn to_login() -> HttpResponse {
    HttpResponse::redirect("/login")
}

/// GET /
pub async fn index(ctx: Arc<AppContext>, req: HttpRequest) -> Result<HttpResponse, Error> {
    let session = current_session(&ctx, &req);
    let email = ctx.email.get();

    let body = ctx.views.home(&HomePage {
        title: HOME_TITLE,
        user: session.as_ref().map(|s| s.user.as_str()),
        email: &email,
    })?;
    Ok(HttpResponse::html(body))
}

/// GET /login?samesite=Lax|Strict
pub async fn login(ctx: Arc<AppContext>, req: HttpRequest) -> Result<HttpResponse, Error> {
    let same_site = login_same_site(req.query("samesite").map(String::as_str));
    let session = ctx.sessions.create(&ctx.session_config.user);

    info!(
        session = session.log_id(),
        user = %session.user,
        same_site = %same_site,
        "login"
    );

    let cookie = ctx.session_config.session_cookie(&session.id, same_site);
    Ok(HttpResponse::redirect("/").with_cookie(&cookie))
}

/// GET /logout
pub async fn logout(ctx: Arc<AppContext>, req: HttpRequest) -> Result<HttpResponse, Error> {
    if let Some(id) = req.cookie(&ctx.session_config.cookie_name) {
        if ctx.sessions.remove(&id) {
            info!("logout");
        } else {
            debug!("logout with unknown session cookie");
        }
    }

    Ok(HttpResponse::redirect("/").with_cookie(&ctx.session_config.removal_cookie()))
}

/// GET /change-email?email=...
pub async fn change_email_unsafe(
    ctx: Arc<AppContext>,
    req: HttpRequest,
) -> Result<HttpResponse, Error> {
    let Some(session) = current_session(&ctx, &req) else {
        return Ok(to_login());
    };

    if let Some(email) = ctx.email.set_if_nonblank(req.query("email").map(String::as_str)) {
        info!(flow = "unsafe", session = session.log_id(), %email, "email changed");
    }

    Ok(HttpResponse::redirect("/"))
}

/// GET /safe
pub async fn safe_form(ctx: Arc<AppContext>, req: HttpRequest) -> Result<HttpResponse, Error> {
    let Some(session) = current_session(&ctx, &req) else {
        return Ok(to_login());
    };

    render_safe(&ctx, &session, None).map(HttpResponse::html)
}

/// POST /change-email-safe
pub async fn change_email_safe(
    ctx: Arc<AppContext>,
    req: HttpRequest,
) -> Result<HttpResponse, Error> {
    let Some(session) = current_session(&ctx, &req) else {
        return Ok(to_login());
    };

    // An unreadable body carries no token and is rejected like a missing one.
    let submitted = ctx.guard.token_from_form(&req);

    match ctx
        .sessions
        .consume_token(&session.id, submitted.as_deref(), &ctx.guard)
    {
        Ok(()) => {
            let new_email = req.form().ok().and_then(|mut form| form.remove("email"));
            if let Some(email) = ctx.email.set_if_nonblank(new_email.as_deref()) {
                info!(flow = "safe", session = session.log_id(), %email, "email changed");
            }
            Ok(HttpResponse::redirect("/safe"))
        }
        Err(SessionError::Csrf(err)) => {
            warn!(session = session.log_id(), reason = %err, "csrf check failed");
            let body = render_safe(&ctx, &session, Some(err.user_message()))?;
            Ok(HttpResponse::html(body).with_status(400))
        }
        Err(SessionError::NotFound(_)) => Ok(to_login()),
    }
}

/// GET /attack
pub async fn attack(ctx: Arc<AppContext>, _req: HttpRequest) -> Result<HttpResponse, Error> {
    let body = ctx.views.attack(&AttackPage {
        title: ATTACK_TITLE,
        target_email: ATTACKER_EMAIL,
    })?;
    Ok(HttpResponse::html(body))
}

/// Render the protected form with the session's live token.
fn render_safe(ctx: &AppContext, session: &Session, error: Option<&str>) -> Result<String, Error> {
    let token = ctx
        .sessions
        .lookup(&session.id)
        .map(|s| s.csrf_token)
        .unwrap_or_else(|| session.csrf_token.clone());
    let email = ctx.email.get();
    let logged_in_at = session.login_time();

    let body = ctx.views.safe(&SafePage {
        title: SAFE_TITLE,
        user: &session.user,
        logged_in_at: &logged_in_at,
        email: &email,
        field_name: ctx.guard.field_name(),
        token: &token,
        error,
    })?;
    Ok(body)
}
