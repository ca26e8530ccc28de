//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds configuration and one pooled `reqwest::Client`. Session state is
//! never shared: every request builds its own [`CookieSession`] and an
//! [`ApiClient`] over it.

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;

use crate::api::{ApiClient, ApiError, build_http_client};
use crate::config::AppConfig;
use crate::session::MemoryStore;
use crate::session::cookies::CookieSession;

/// Client type used by page handlers.
pub type PageClient = ApiClient<Arc<MemoryStore>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let http = build_http_client(config.request_timeout, config.connect_timeout)?;
        Ok(Self { config: Arc::new(config), http })
    }

    /// Request-scoped session seeded from `jar`, plus a client bound to it
    /// that forwards the browser's session cookies.
    #[must_use]
    pub fn session_client(&self, jar: &CookieJar) -> (CookieSession, PageClient) {
        let session = CookieSession::from_jar(jar);
        let client = ApiClient::new(self.http.clone(), &self.config.api_base_url, session.store())
            .with_cookies(session.forwarded_cookies());
        (session, client)
    }

    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.config.cookie_secure
    }
}
