//! Dashboard page and its session actions.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;

use super::flash_redirect;
use crate::api::{ApiError, auth};
use crate::guard::login_redirect;
use crate::pages::dashboard::DashboardPage;
use crate::pages::render;
use crate::session::cookies::clear_session_cookies;
use crate::state::AppState;
use crate::toast::{Toast, take_flash};

/// `GET /dashboard`: verify the session with the backend before rendering.
pub async fn page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let secure = state.cookie_secure();
    let (jar, pending) = take_flash(jar, secure);
    let (session, api) = state.session_client(&jar);

    match auth::verify_session(&api).await {
        Ok(user) => {
            let jar = session.write_back(jar, secure);
            let toast = pending.or_else(|| Some(Toast::success("Sesión verificada", Some("Perfil cargado correctamente"))));
            let html = render(move || view! { <DashboardPage toast user/> });
            (jar, html).into_response()
        }
        Err(ApiError::SessionExpired) => {
            tracing::info!("session expired; back to login");
            (clear_session_cookies(jar, secure), Redirect::to("/login")).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "session verification failed");
            let jar = session.write_back(jar, secure);
            let toast = Toast::error("Sesión inválida", Some("Inicia sesión nuevamente"));
            flash_redirect(jar, &toast, secure, &login_redirect("auth_failed", None))
        }
    }
}

/// `POST /dashboard/logout`: drop the session cookies locally.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let secure = state.cookie_secure();
    tracing::info!("logout");
    let jar = clear_session_cookies(jar, secure);
    flash_redirect(jar, &Toast::success("Sesión cerrada", Some("Has salido correctamente")), secure, "/login")
}

/// `POST /dashboard/refresh`: renew tokens with the refresh cookie.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    let secure = state.cookie_secure();
    let (session, api) = state.session_client(&jar);

    match api.refresh_from_cookies().await {
        Ok(_) => {
            let jar = session.write_back(jar, secure);
            flash_redirect(jar, &Toast::success("Sesión actualizada", Some("Tokens y perfil renovados")), secure, "/dashboard")
        }
        Err(e) => {
            tracing::warn!(error = %e, "manual refresh failed");
            let toast = Toast::error("No se pudo refrescar", Some("Inicia sesión nuevamente"));
            flash_redirect(jar, &toast, secure, &login_redirect("auth_failed", None))
        }
    }
}
