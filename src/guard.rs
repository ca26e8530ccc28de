//! Cookie-presence route guard.
//!
//! Runs before any page handler. It never inspects token contents: a
//! request either carries a session cookie or is sent to the login page.
//! Token validity is checked later by the pages through the backend.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use url::form_urlencoded;

use crate::api::auth::GOOGLE_LOGIN_HREF;
use crate::session::cookies::has_session_cookie;

/// Reachable without a session (exact match).
pub const PUBLIC_PATHS: [&str; 5] = ["/", "/login", "/register", "/auth/callback", GOOGLE_LOGIN_HREF];

/// Paths the guard does not run on at all (exact match).
const EXCLUDED_PATHS: [&str; 2] = ["/favicon.ico", "/healthz"];
/// Static files, matched by prefix.
const ASSETS_PREFIX: &str = "/assets/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

#[must_use]
pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

#[must_use]
pub fn is_excluded(path: &str) -> bool {
    path.starts_with(ASSETS_PREFIX) || EXCLUDED_PATHS.contains(&path)
}

/// `/login?error=<error>` plus an encoded `next` when given.
#[must_use]
pub fn login_redirect(error: &str, next: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("error", error);
    if let Some(next) = next {
        query.append_pair("next", next);
    }
    format!("/login?{}", query.finish())
}

#[must_use]
pub fn evaluate(path: &str, jar: &CookieJar) -> GuardDecision {
    if is_excluded(path) || is_public(path) || has_session_cookie(jar) {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(login_redirect("auth_required", Some(path)))
    }
}

/// Axum middleware applying [`evaluate`] with a `307` redirect.
pub async fn require_session(jar: CookieJar, req: Request, next: Next) -> Response {
    match evaluate(req.uri().path(), &jar) {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::Redirect(location) => {
            tracing::debug!(path = %req.uri().path(), "no session cookie; redirecting to login");
            Redirect::temporary(&location).into_response()
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
