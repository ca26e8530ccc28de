//! Session data model shared by the stores, the HTTP client and the pages.

use serde::{Deserialize, Serialize};

/// Profile returned by the backend. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    /// Identity provider that created the account (e.g. `"local"`, `"google"`).
    pub provider: String,
    pub token_version: i64,
}

/// A complete session as issued by login, registration or refresh.
///
/// This is the only shape accepted by [`SessionStore::set_session`], which
/// keeps the two tokens from ever being stored separately.
///
/// [`SessionStore::set_session`]: super::SessionStore::set_session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Current session as seen by a store. Either both tokens are present or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// Session with tokens but no profile yet, e.g. rebuilt from cookies.
    #[must_use]
    pub fn from_tokens(access_token: String, refresh_token: String) -> Self {
        Self { access_token: Some(access_token), refresh_token: Some(refresh_token), user: None }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some()
    }

    /// Both tokens, when the session holds them.
    #[must_use]
    pub fn tokens(&self) -> Option<(&str, &str)> {
        match (&self.access_token, &self.refresh_token) {
            (Some(access), Some(refresh)) => Some((access.as_str(), refresh.as_str())),
            _ => None,
        }
    }
}

impl From<SessionData> for Session {
    fn from(data: SessionData) -> Self {
        Self { access_token: Some(data.access_token), refresh_token: Some(data.refresh_token), user: Some(data.user) }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
