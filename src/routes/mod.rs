//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages, form posts and the same-origin backend proxy share one Axum
//! router. The cookie guard wraps every route; static assets, the favicon
//! and `/healthz` are let through by the guard itself.

pub mod callback;
pub mod dashboard;
pub mod diagnostics;
pub mod login;
pub mod proxy;
pub mod register;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{any, get, post};
use axum_extra::extract::cookie::CookieJar;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::guard;
use crate::state::AppState;
use crate::toast::{Toast, set_flash};

/// Full application router.
pub fn app(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);
    Router::new()
        .route("/", get(root))
        .route("/login", get(login::page).post(login::submit))
        .route("/register", get(register::page).post(register::submit))
        .route("/auth/callback", get(callback::handle))
        .route("/dashboard", get(dashboard::page))
        .route("/dashboard/logout", post(dashboard::logout))
        .route("/dashboard/refresh", post(dashboard::refresh))
        .route("/diagnostics", get(diagnostics::page))
        .route("/api/pina/{*path}", any(proxy::forward))
        .route("/pina/{*path}", any(proxy::forward))
        .route("/healthz", get(healthz))
        .nest_service("/assets", assets)
        .layer(middleware::from_fn(guard::require_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Redirect {
    Redirect::temporary("/dashboard")
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Queue `toast` and send the browser to `to` with a `303`.
pub(crate) fn flash_redirect(jar: CookieJar, toast: &Toast, secure: bool, to: &str) -> Response {
    (set_flash(jar, toast, secure), Redirect::to(to)).into_response()
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
