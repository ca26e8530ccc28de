//! Front-end configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

pub const DEFAULT_PORT: u16 = 4011;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
/// Path prefix of the backend API, both on the backend and on the proxy.
pub const API_PREFIX: &str = "/api/pina";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
    #[error("invalid URL in {var}: {source}")]
    InvalidUrl { var: &'static str, source: url::ParseError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Backend origin without trailing slash; the proxy target.
    pub backend_url: String,
    /// Base of server-side API calls, normally `{backend_url}/api/pina`.
    pub api_base_url: String,
    /// Skip cookie-based session recovery on the OAuth callback.
    pub disable_refresh: bool,
    pub cookie_secure: bool,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub assets_dir: PathBuf,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `PORT`: default 4011
    /// - `BACKEND_URL`: default `http://localhost:3000`
    /// - `PINA_API_URL`: default `{BACKEND_URL}/api/pina`
    /// - `PINA_DISABLE_REFRESH`: boolean, default false
    /// - `COOKIE_SECURE`: boolean; inferred from an `https://` backend when unset
    /// - `PINA_REQUEST_TIMEOUT_SECS`: default 10
    /// - `PINA_CONNECT_TIMEOUT_SECS`: default 5
    /// - `PINA_ASSETS_DIR`: directory served under `/assets`, default `assets/`
    ///   in the crate root
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable port or URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { var: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let backend_url = normalize_base(
            "BACKEND_URL",
            &std::env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_owned()),
        )?;
        let api_base_url = match std::env::var("PINA_API_URL") {
            Ok(raw) if !raw.trim().is_empty() => normalize_base("PINA_API_URL", &raw)?,
            _ => format!("{backend_url}{API_PREFIX}"),
        };

        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or_else(|| backend_url.starts_with("https://"));

        Ok(Self {
            port,
            backend_url,
            api_base_url,
            disable_refresh: env_bool("PINA_DISABLE_REFRESH").unwrap_or(false),
            cookie_secure,
            request_timeout: Duration::from_secs(env_parse_u64(
                "PINA_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            connect_timeout: Duration::from_secs(env_parse_u64(
                "PINA_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
            assets_dir: std::env::var("PINA_ASSETS_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map_or_else(default_assets_dir, PathBuf::from),
        })
    }

    /// Config pointing at `backend_url`, everything else default. Used by tests
    /// and embedding code that does not read the environment.
    #[must_use]
    pub fn for_backend(backend_url: &str) -> Self {
        let backend_url = backend_url.trim().trim_end_matches('/').to_owned();
        Self {
            port: DEFAULT_PORT,
            api_base_url: format!("{backend_url}{API_PREFIX}"),
            backend_url,
            disable_refresh: false,
            cookie_secure: false,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            assets_dir: default_assets_dir(),
        }
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Parse a boolean env var (`1/true/yes/on`, `0/false/no/off`, case-insensitive).
pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

/// Validate an absolute URL and strip the trailing slash.
fn normalize_base(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl { var, source })?;
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
