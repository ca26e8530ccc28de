//! Errors produced by the backend HTTP client.

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The backend could not be reached.
    #[error("unable to reach the server: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// Non-success status. `message` is already user-facing.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A 401 could not be recovered by refreshing; the session was cleared.
    #[error("Sesión expirada")]
    SessionExpired,

    #[error("response decode failed: {0}")]
    Parse(String),

    #[error("request encode failed: {0}")]
    Serialization(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// HTTP status carried by the error, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Extract a user-facing message from an error response body.
///
/// Prefers the JSON `message` field (a string, or an array of validation
/// messages joined with `", "`), then the trimmed raw body, then `HTTP <status>`.
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {status}");
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match json.get("message") {
            Some(serde_json::Value::String(message)) if !message.trim().is_empty() => {
                return truncate(message.trim());
            }
            Some(serde_json::Value::Array(items)) => {
                let joined = items.iter().filter_map(serde_json::Value::as_str).collect::<Vec<_>>().join(", ");
                if !joined.is_empty() {
                    return truncate(&joined);
                }
            }
            _ => {}
        }
    }

    truncate(trimmed)
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
