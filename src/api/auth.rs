//! Authentication endpoints, shared by the web pages and the terminal client.

use super::client::{ApiClient, RequestOptions};
use super::error::ApiError;
use super::types::{HealthStatus, KycResponse, LoginRequest, LoginResponse, RegisterRequest, User};
use crate::session::{SessionData, SessionStore};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/registro/creadora";
pub const ME_PATH: &str = "/auth/me";
/// Start of the backend Google OAuth flow, as the browser reaches it
/// through the same-origin proxy.
pub const GOOGLE_LOGIN_HREF: &str = "/api/pina/auth/google";
pub const HEALTH_PATH: &str = "/health";

/// `POST /auth/login`; stores the returned session.
///
/// # Errors
///
/// Returns the backend failure; the store is left untouched.
pub async fn login<S: SessionStore>(api: &ApiClient<S>, credentials: &LoginRequest) -> Result<SessionData, ApiError> {
    let session: LoginResponse = api.post(LOGIN_PATH, credentials).await?;
    api.store().set_session(session.clone());
    tracing::info!(user_id = %session.user.id, provider = %session.user.provider, "login succeeded");
    Ok(session)
}

/// `POST /registro/creadora`. Registration does not open a session.
///
/// # Errors
///
/// Returns the backend failure (409 when the email is taken).
pub async fn register<S: SessionStore>(api: &ApiClient<S>, request: &RegisterRequest) -> Result<KycResponse, ApiError> {
    let response: KycResponse = api.post(REGISTER_PATH, request).await?;
    tracing::info!(user_id = %response.user_id, status = ?response.status, "registration submitted");
    Ok(response)
}

/// `GET /auth/me` with the stored session.
///
/// # Errors
///
/// See [`ApiClient::request`].
pub async fn me<S: SessionStore>(api: &ApiClient<S>) -> Result<User, ApiError> {
    api.get(ME_PATH).await
}

/// `GET /auth/me` with an explicit access token, then store the full session.
///
/// # Errors
///
/// See [`ApiClient::request`]. Nothing is stored on failure.
pub async fn adopt_tokens<S: SessionStore>(
    api: &ApiClient<S>,
    access_token: &str,
    refresh_token: &str,
) -> Result<SessionData, ApiError> {
    let user: User = api.request(ME_PATH, RequestOptions::get().bearer(access_token)?).await?;
    let session = SessionData { access_token: access_token.to_owned(), refresh_token: refresh_token.to_owned(), user };
    api.store().set_session(session.clone());
    Ok(session)
}

/// Re-fetch the profile and, when the store holds both tokens, replace the
/// stored user with it.
///
/// # Errors
///
/// See [`ApiClient::request`].
pub async fn verify_session<S: SessionStore>(api: &ApiClient<S>) -> Result<User, ApiError> {
    let user = me(api).await?;
    let current = api.store().snapshot();
    if let Some((access_token, refresh_token)) = current.tokens() {
        api.store().set_session(SessionData {
            access_token: access_token.to_owned(),
            refresh_token: refresh_token.to_owned(),
            user: user.clone(),
        });
    }
    Ok(user)
}

/// `GET /health`.
///
/// # Errors
///
/// Returns the transport or status failure.
pub async fn health<S: SessionStore>(api: &ApiClient<S>) -> Result<HealthStatus, ApiError> {
    api.get(HEALTH_PATH).await
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
