//! Browser cookies as the persistence layer of a request-scoped session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser never sees tokens from script: they live in `HttpOnly`
//! cookies. Each request rebuilds a [`MemoryStore`] from those cookies, lets
//! the HTTP client mutate it (login, refresh, clear), then writes any change
//! back onto the response cookie jar.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::store::{MemoryStore, SessionStore};
use super::types::Session;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";
/// Name some backend builds use for the refresh cookie.
pub const LEGACY_REFRESH_COOKIE: &str = "refresh_token";

const SESSION_COOKIES: [&str; 3] = [ACCESS_COOKIE, REFRESH_COOKIE, LEGACY_REFRESH_COOKIE];
const REFRESH_MAX_AGE: Duration = Duration::days(7);

fn cookie_value<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(Cookie::value).filter(|v| !v.is_empty())
}

/// Refresh cookie under either accepted name.
#[must_use]
pub fn refresh_cookie(jar: &CookieJar) -> Option<&str> {
    cookie_value(jar, REFRESH_COOKIE).or_else(|| cookie_value(jar, LEGACY_REFRESH_COOKIE))
}

#[must_use]
pub fn has_refresh_cookie(jar: &CookieJar) -> bool {
    refresh_cookie(jar).is_some()
}

#[must_use]
pub fn has_access_cookie(jar: &CookieJar) -> bool {
    cookie_value(jar, ACCESS_COOKIE).is_some()
}

/// Presence of any session cookie. Values are not inspected.
#[must_use]
pub fn has_session_cookie(jar: &CookieJar) -> bool {
    has_refresh_cookie(jar) || has_access_cookie(jar)
}

/// Session rebuilt from cookies. Both tokens are required; a lone cookie
/// yields an empty session and is only forwarded to the backend as-is.
#[must_use]
pub fn session_from_cookies(jar: &CookieJar) -> Session {
    match (cookie_value(jar, ACCESS_COOKIE), refresh_cookie(jar)) {
        (Some(access), Some(refresh)) => Session::from_tokens(access.to_owned(), refresh.to_owned()),
        _ => Session::default(),
    }
}

/// `Cookie` header value carrying only the session cookies, for forwarding
/// to the backend the way a same-origin `fetch` with credentials would.
#[must_use]
pub fn forwarded_cookie_header(jar: &CookieJar) -> Option<String> {
    let pairs: Vec<String> = SESSION_COOKIES
        .iter()
        .filter_map(|name| cookie_value(jar, name).map(|value| format!("{name}={value}")))
        .collect();
    if pairs.is_empty() { None } else { Some(pairs.join("; ")) }
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Set both token cookies. Sessions without both tokens are not written.
#[must_use]
pub fn write_session(jar: CookieJar, session: &Session, secure: bool) -> CookieJar {
    let Some((access, refresh)) = session.tokens() else {
        return jar;
    };
    let mut refresh_cookie = session_cookie(REFRESH_COOKIE, refresh.to_owned(), secure);
    refresh_cookie.set_max_age(REFRESH_MAX_AGE);
    jar.add(session_cookie(ACCESS_COOKIE, access.to_owned(), secure)).add(refresh_cookie)
}

/// Expire every session cookie, including the legacy refresh name.
#[must_use]
pub fn clear_session_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    SESSION_COOKIES.iter().fold(jar, |jar, name| {
        let mut cookie = session_cookie(*name, String::new(), secure);
        cookie.set_max_age(Duration::ZERO);
        jar.add(cookie)
    })
}

// =============================================================================
// REQUEST-SCOPED SESSION
// =============================================================================

/// In-memory store for one browser request plus the cookies it came from.
pub struct CookieSession {
    store: Arc<MemoryStore>,
    initial: Session,
    forwarded: Option<String>,
}

impl CookieSession {
    #[must_use]
    pub fn from_jar(jar: &CookieJar) -> Self {
        let initial = session_from_cookies(jar);
        Self {
            store: Arc::new(MemoryStore::with_session(initial.clone())),
            initial,
            forwarded: forwarded_cookie_header(jar),
        }
    }

    #[must_use]
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }

    #[must_use]
    pub fn forwarded_cookies(&self) -> Option<String> {
        self.forwarded.clone()
    }

    /// Persist token changes made during the request onto `jar`.
    #[must_use]
    pub fn write_back(&self, jar: CookieJar, secure: bool) -> CookieJar {
        let current = self.store.snapshot();
        if current.tokens() == self.initial.tokens() {
            return jar;
        }
        if current.is_authenticated() {
            write_session(jar, &current, secure)
        } else {
            clear_session_cookies(jar, secure)
        }
    }
}

#[cfg(test)]
#[path = "cookies_test.rs"]
mod tests;
