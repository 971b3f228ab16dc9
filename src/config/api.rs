//! REST backend connection settings.
//!
//! This module reads the backend base URL, optional bearer token, and HTTP
//! timeout from environment variables (typically loaded from a `.env` file).
//! Connection settings are carried as an explicit [`ApiConfig`] value so that
//! callers and tests can construct clients without touching the process
//! environment.

use crate::errors::{Error, Result};

/// Environment variable naming the backend base URL.
const API_URL_VAR: &str = "SCREENBOOK_API_URL";

/// Environment variable holding an optional bearer token.
const API_TOKEN_VAR: &str = "SCREENBOOK_API_TOKEN";

/// Environment variable overriding the HTTP request timeout in seconds.
const HTTP_TIMEOUT_VAR: &str = "SCREENBOOK_HTTP_TIMEOUT_SECS";

/// Request timeout applied when the environment does not override it.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the REST backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend, stored without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request when present.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Creates settings for the given base URL with the default timeout and no token.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Attaches a bearer token to these settings.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Reads connection settings from the process environment.
    ///
    /// # Errors
    /// Returns an error if `SCREENBOOK_API_URL` is unset or the timeout
    /// override is not a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var(API_URL_VAR).ok(),
            std::env::var(API_TOKEN_VAR).ok(),
            std::env::var(HTTP_TIMEOUT_VAR).ok(),
        )
    }

    /// Builds settings from already-read variable values.
    ///
    /// # Errors
    /// Returns an error if the base URL is missing/blank or the timeout value
    /// does not parse as seconds.
    pub fn from_vars(
        base_url: Option<String>,
        token: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self> {
        let base_url = base_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config {
                message: format!("{API_URL_VAR} must be set to the backend base URL"),
            })?;

        let timeout_secs = match timeout_secs {
            Some(raw) => raw.parse().map_err(|_| Error::Config {
                message: format!("{HTTP_TIMEOUT_VAR} must be a number of seconds, got '{raw}'"),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: normalize_base_url(base_url),
            token: token.filter(|token| !token.is_empty()),
            timeout_secs,
        })
    }
}

/// Strips trailing slashes so endpoint paths can always be joined with `/`.
fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
