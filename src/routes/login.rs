//! `GET /login` and the login form post.

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;
use serde::Deserialize;
use url::form_urlencoded;

use super::flash_redirect;
use crate::api::{ApiError, auth};
use crate::forms::{FieldErrors, LoginForm, safe_next};
use crate::pages::login::{LoginPage, error_notice};
use crate::pages::render;
use crate::state::AppState;
use crate::toast::{Toast, take_flash};

const DEFAULT_DESTINATION: &str = "/dashboard";

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    error: Option<String>,
    next: Option<String>,
}

pub async fn page(State(state): State<AppState>, jar: CookieJar, Query(query): Query<LoginQuery>) -> Response {
    let (jar, toast) = take_flash(jar, state.cookie_secure());
    let notice = query.error.as_deref().and_then(error_notice);
    let next = safe_next(query.next.as_deref()).map(str::to_owned);
    let html = render(move || {
        view! { <LoginPage toast notice email=String::new() next errors=FieldErrors::default()/> }
    });
    (jar, html).into_response()
}

pub async fn submit(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let secure = state.cookie_secure();
    let next = safe_next(form.next.as_deref()).map(str::to_owned);

    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            let email = form.email;
            let html = render(move || view! { <LoginPage toast=None notice=None email next errors/> });
            return (StatusCode::UNPROCESSABLE_ENTITY, html).into_response();
        }
    };

    let (session, api) = state.session_client(&jar);
    match auth::login(&api, &credentials).await {
        Ok(_) => {
            let jar = session.write_back(jar, secure);
            let destination = next.as_deref().unwrap_or(DEFAULT_DESTINATION);
            (jar, Redirect::to(destination)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "login rejected");
            let jar = session.write_back(jar, secure);
            let toast = Toast::error("Error al iniciar sesión", Some(&failure_description(&e)));
            flash_redirect(jar, &toast, secure, &login_path(next.as_deref()))
        }
    }
}

/// Backend message, or a generic one when there is none to show. A 401
/// from the login endpoint surfaces as an expired session, which here
/// means bad credentials.
fn failure_description(error: &ApiError) -> String {
    let message = error.to_string();
    if error.is_session_expired() || message.trim().is_empty() {
        "Credenciales incorrectas".to_owned()
    } else {
        message
    }
}

fn login_path(next: Option<&str>) -> String {
    match next {
        Some(next) => format!("/login?{}", form_urlencoded::Serializer::new(String::new()).append_pair("next", next).finish()),
        None => "/login".to_owned(),
    }
}
