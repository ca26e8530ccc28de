//! `GET /auth/callback`: landing page of the backend OAuth flow.
//!
//! Tokens in the query string are adopted after a profile check. Without
//! them the session is recovered from the backend's refresh cookie.

use axum::extract::{Query, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::flash_redirect;
use crate::api::auth;
use crate::guard::login_redirect;
use crate::state::AppState;
use crate::toast::Toast;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackQuery {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

pub async fn handle(State(state): State<AppState>, jar: CookieJar, Query(query): Query<CallbackQuery>) -> Response {
    let secure = state.cookie_secure();
    let (session, api) = state.session_client(&jar);

    let access = query.access_token.filter(|t| !t.is_empty());
    let refresh = query.refresh_token.filter(|t| !t.is_empty());

    if let (Some(access), Some(refresh)) = (access, refresh) {
        return match auth::adopt_tokens(&api, &access, &refresh).await {
            Ok(data) => {
                tracing::info!(user_id = %data.user.id, "oauth tokens adopted");
                let jar = session.write_back(jar, secure);
                let toast = Toast::success("Autenticación exitosa", Some("Has iniciado sesión correctamente"));
                flash_redirect(jar, &toast, secure, "/dashboard")
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile fetch after oauth failed");
                let toast = Toast::error("Error al cargar tu perfil", Some("No se pudo obtener tus datos"));
                flash_redirect(jar, &toast, secure, &login_redirect("fetch_user_failed", None))
            }
        };
    }

    if state.config.disable_refresh {
        let toast = Toast::error(
            "Sesión no disponible",
            Some("Backend no disponible. Inicia sesión cuando esté activo."),
        );
        return flash_redirect(jar, &toast, secure, "/login");
    }

    match api.refresh_from_cookies().await {
        Ok(data) => {
            tracing::info!(user_id = %data.user.id, "session restored from cookie");
            let jar = session.write_back(jar, secure);
            let toast = Toast::success("Sesión restaurada", Some("Tu sesión fue recuperada correctamente"));
            flash_redirect(jar, &toast, secure, "/dashboard")
        }
        Err(e) => {
            tracing::warn!(error = %e, "cookie refresh on callback failed");
            let toast = Toast::error("Autenticación fallida", Some("No fue posible restaurar la sesión"));
            flash_redirect(jar, &toast, secure, &login_redirect("auth_failed", None))
        }
    }
}
