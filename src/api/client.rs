//! Backend HTTP client with bearer attachment and single refresh-and-retry.
//!
//! ARCHITECTURE
//! ============
//! Every call reads the access token from the [`SessionStore`] and attaches
//! it as a bearer credential. A 401 on a first attempt triggers exactly one
//! refresh against `/auth/refresh`; on success the store is replaced and the
//! original request is replayed once with the retry flag set, which disables
//! any further refresh. On refresh failure the store is cleared and the
//! caller receives [`ApiError::SessionExpired`] so it can send the user back
//! to `/login`.
//!
//! Concurrent 401s from the same session each refresh on their own; there
//! is no single-flight coordination.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, error_message};
use crate::session::{SessionData, SessionStore};

pub const REFRESH_PATH: &str = "/auth/refresh";

/// Build the shared `reqwest` client. Redirects are never followed so the
/// proxy can hand backend redirects (OAuth) straight to the browser.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(request_timeout: Duration, connect_timeout: Duration) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| ApiError::ClientBuild(e.to_string()))
}

// =============================================================================
// REQUEST OPTIONS
// =============================================================================

/// Method, headers and JSON body of a backend call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    method: Method,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
    is_retry: bool,
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn post() -> Self {
        Self { method: Method::POST, ..Self::default() }
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Serialization`] if `body` cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?);
        Ok(self)
    }

    /// Use an explicit bearer token instead of the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] if the token is not a valid header value.
    pub fn bearer(self, token: &str) -> Result<Self, ApiError> {
        self.header(AUTHORIZATION, &format!("Bearer {token}"))
    }

    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] if `value` is not a valid header value.
    pub fn header(mut self, name: HeaderName, value: &str) -> Result<Self, ApiError> {
        self.headers.insert(name, HeaderValue::from_str(value)?);
        Ok(self)
    }

    #[must_use]
    pub fn is_retry(&self) -> bool {
        self.is_retry
    }

    fn replay_with(&self, access_token: &str) -> Result<Self, ApiError> {
        let replay = Self { is_retry: true, ..self.clone() };
        replay.bearer(access_token)
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient<S> {
    http: reqwest::Client,
    base_url: String,
    store: S,
    cookies: Option<HeaderValue>,
}

impl<S: SessionStore> ApiClient<S> {
    pub fn new(http: reqwest::Client, base_url: &str, store: S) -> Self {
        Self { http, base_url: base_url.trim().trim_end_matches('/').to_owned(), store, cookies: None }
    }

    /// Forward a `Cookie` header on every backend call, including refresh.
    #[must_use]
    pub fn with_cookies(mut self, cookies: Option<String>) -> Self {
        self.cookies = cookies.and_then(|raw| match HeaderValue::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "dropping unforwardable cookie header");
                None
            }
        });
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request, refreshing and replaying once on 401.
    ///
    /// # Errors
    ///
    /// - [`ApiError::SessionExpired`] when a 401 could not be recovered; the
    ///   store has been cleared.
    /// - [`ApiError::Http`] for any other non-success status, including a
    ///   401 on the replayed request.
    /// - [`ApiError::Network`], [`ApiError::Timeout`], [`ApiError::Parse`] for
    ///   transport and decoding failures.
    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        let response = self.send(path, &options).await?;

        if response.status() == StatusCode::UNAUTHORIZED && !options.is_retry() {
            tracing::debug!(%path, "unauthorized; attempting token refresh");
            let Some(access_token) = self.try_refresh().await else {
                self.store.clear_session();
                tracing::info!(%path, "refresh failed; session cleared");
                return Err(ApiError::SessionExpired);
            };

            let replay = options.replay_with(&access_token)?;
            let response = self.send(path, &replay).await?;
            return decode(response).await;
        }

        decode(response).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(path, RequestOptions::get()).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.request(path, RequestOptions::post().json(body)?).await
    }

    /// Refresh relying only on forwarded cookies (no body), then store the
    /// new session. Used by the OAuth callback and the dashboard action.
    ///
    /// # Errors
    ///
    /// Returns the refresh failure; the store is left untouched.
    pub async fn refresh_from_cookies(&self) -> Result<SessionData, ApiError> {
        self.post_refresh(None).await
    }

    /// Refresh with the stored refresh token in the body (cookies only when
    /// the store has none), then store the new session.
    ///
    /// # Errors
    ///
    /// Returns the refresh failure; the store is left untouched.
    pub async fn refresh(&self) -> Result<SessionData, ApiError> {
        self.post_refresh(self.refresh_body()).await
    }

    async fn send(&self, path: &str, options: &RequestOptions) -> Result<reqwest::Response, ApiError> {
        let mut headers = options.headers.clone();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // An explicit Authorization (e.g. OAuth callback tokens) wins over the store.
        if !options.is_retry && !headers.contains_key(AUTHORIZATION) {
            if let Some(token) = self.store.access_token() {
                headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
            }
        }
        if let Some(cookies) = &self.cookies {
            headers.insert(COOKIE, cookies.clone());
        }

        let mut request = self.http.request(options.method.clone(), self.url(path)).headers(headers);
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        tracing::debug!(%path, status = response.status().as_u16(), retry = options.is_retry, "backend call");
        Ok(response)
    }

    fn refresh_body(&self) -> Option<serde_json::Value> {
        self.store
            .refresh_token()
            .map(|refresh_token| serde_json::json!({ "refreshToken": refresh_token }))
    }

    async fn try_refresh(&self) -> Option<String> {
        match self.post_refresh(self.refresh_body()).await {
            Ok(data) => Some(data.access_token),
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed");
                None
            }
        }
    }

    async fn post_refresh(&self, body: Option<serde_json::Value>) -> Result<SessionData, ApiError> {
        let mut request = self.http.post(self.url(REFRESH_PATH));
        if let Some(cookies) = &self.cookies {
            request = request.header(COOKIE, cookies.clone());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let data: SessionData = decode(request.send().await?).await?;
        self.store.set_session(data.clone());
        tracing::debug!(user_id = %data.user.id, "session refreshed");
        Ok(data)
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim();
        if self.base_url.is_empty() {
            path.to_owned()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }
}

/// Decode a success body as JSON (`204` and empty bodies as `null`) or map
/// the failure to [`ApiError::Http`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = if status == StatusCode::NO_CONTENT { String::new() } else { response.text().await? };

    if !status.is_success() {
        return Err(ApiError::Http { status: status.as_u16(), message: error_message(status.as_u16(), &body) });
    }

    if body.trim().is_empty() {
        return serde_json::from_value(serde_json::Value::Null).map_err(|e| ApiError::Parse(e.to_string()));
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
