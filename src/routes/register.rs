//! `GET /register` and the creator registration post.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;

use super::flash_redirect;
use crate::api::{ApiError, auth};
use crate::forms::{FieldErrors, RegisterForm};
use crate::pages::register::RegisterPage;
use crate::pages::render;
use crate::state::AppState;
use crate::toast::{Toast, take_flash};

const DEFAULT_PENDING_MESSAGE: &str = "Verificación pendiente, te avisaremos al finalizar";

pub async fn page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, toast) = take_flash(jar, state.cookie_secure());
    let html = render(move || {
        view! { <RegisterPage toast form=RegisterForm::default() errors=FieldErrors::default()/> }
    });
    (jar, html).into_response()
}

pub async fn submit(State(state): State<AppState>, jar: CookieJar, Form(form): Form<RegisterForm>) -> Response {
    let secure = state.cookie_secure();

    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            let form = RegisterForm { password: String::new(), ..form };
            let html = render(move || view! { <RegisterPage toast=None form errors/> });
            return (StatusCode::UNPROCESSABLE_ENTITY, html).into_response();
        }
    };

    let (session, api) = state.session_client(&jar);
    match auth::register(&api, &request).await {
        Ok(response) => {
            let message = Some(response.message.as_str())
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(DEFAULT_PENDING_MESSAGE);
            flash_redirect(jar, &Toast::info("Registro iniciado", Some(message)), secure, "/login")
        }
        Err(e) => {
            tracing::warn!(error = %e, "registration rejected");
            let jar = session.write_back(jar, secure);
            let message = e.to_string();
            let toast = if is_email_taken(&e) {
                Toast::warning("Email ya registrado", Some(&message))
            } else {
                Toast::error("Registro fallido", Some(&message))
            };
            flash_redirect(jar, &toast, secure, "/register")
        }
    }
}

/// Conflict status, or a backend message naming the taken email.
pub(crate) fn is_email_taken(error: &ApiError) -> bool {
    if error.status() == Some(409) {
        return true;
    }
    let message = error.to_string().to_lowercase();
    message.contains("email_taken") || message.contains("ya registrado")
}
