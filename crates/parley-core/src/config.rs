//! Backend base URL resolution.

use thiserror::Error;
use url::Url;

/// Base URL used when no override is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable selecting the backend base URL.
pub const API_URL_ENV: &str = "PARLEY_API_URL";

/// Configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configured base URL is unusable.
    #[error("invalid API URL '{input}': {reason}")]
    InvalidUrl {
        /// Value as configured.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Pick the base URL from an optional override, trimming whitespace and trailing
/// slashes; blank values fall back to [`DEFAULT_API_URL`].
#[must_use]
pub fn resolve_base_url(raw: Option<&str>) -> String {
    raw.map(|value| value.trim().trim_end_matches('/'))
        .filter(|value| !value.is_empty())
        .map_or_else(|| DEFAULT_API_URL.to_string(), str::to_string)
}

/// Resolve and validate a base URL for the native client.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] when the value does not parse or is not an
/// `http`/`https` URL.
pub fn parse_base_url(input: &str) -> Result<Url, ConfigError> {
    let resolved = resolve_base_url(Some(input));
    let invalid = |reason: String| ConfigError::InvalidUrl {
        input: input.to_string(),
        reason,
    };
    let url = Url::parse(&resolved).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
