//! `GET /diagnostics`: backend health and session cookie presence.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use leptos::prelude::*;

use crate::api::auth;
use crate::pages::diagnostics::DiagnosticsPage;
use crate::pages::render;
use crate::session::cookies::{ACCESS_COOKIE, LEGACY_REFRESH_COOKIE, REFRESH_COOKIE};
use crate::state::AppState;

pub async fn page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (_session, api) = state.session_client(&jar);
    let health = match auth::health(&api).await {
        Ok(health) => Some(health),
        Err(e) => {
            tracing::warn!(error = %e, "backend health check failed");
            None
        }
    };

    let cookies: Vec<(&'static str, bool)> = [ACCESS_COOKIE, REFRESH_COOKIE, LEGACY_REFRESH_COOKIE]
        .into_iter()
        .map(|name| (name, jar.get(name).map(Cookie::value).is_some_and(|v| !v.is_empty())))
        .collect();

    render(move || view! { <DiagnosticsPage health cookies/> }).into_response()
}
