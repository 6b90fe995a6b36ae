//! Client configuration sourced from the environment.
//!
//! # Design
//! - Every setting has a default except the token, which stays optional.
//! - Lookup is injectable so tests never touch the process environment.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "BLOOM_API_URL";
/// Environment variable holding the bearer token.
pub const ENV_API_TOKEN: &str = "BLOOM_API_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "BLOOM_HTTP_TIMEOUT_SECS";

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL did not parse.
    #[error("invalid API base URL")]
    InvalidUrl {
        /// Rejected value.
        value: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// The base URL cannot carry path segments.
    #[error("API base URL must be an http(s) origin")]
    UnsupportedUrl {
        /// Rejected value.
        value: String,
    },
    /// The timeout was not a positive whole number of seconds.
    #[error("invalid HTTP timeout")]
    InvalidTimeout {
        /// Rejected value.
        value: String,
    },
    /// The token cannot be sent as a header.
    #[error("API token contains invalid header characters")]
    InvalidToken,
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    HttpClient {
        /// Builder failure.
        #[source]
        source: reqwest::Error,
    },
}

/// Settings for [`crate::HttpBloomClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin, e.g. `http://127.0.0.1:3000`.
    pub base_url: Url,
    /// Bearer token attached to every request.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with defaults for everything else.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the URL does not parse or is not an http(s) origin.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Attach a bearer token; blank tokens are ignored.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a value is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&base_url)?;
        if let Some(token) = lookup(ENV_API_TOKEN) {
            config = config.with_token(token);
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            config.timeout = parse_timeout(&raw)?;
        }
        Ok(config)
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedUrl {
            value: value.to_string(),
        });
    }
    Ok(url)
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:3000/");
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn environment_overrides_are_honoured() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.bloom.test"),
            (ENV_API_TOKEN, "secret"),
            (ENV_HTTP_TIMEOUT_SECS, " 3 "),
        ]))
        .expect("config");
        assert_eq!(config.base_url.host_str(), Some("api.bloom.test"));
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn blank_token_is_treated_as_absent() {
        let config =
            ClientConfig::from_lookup(lookup(&[(ENV_API_TOKEN, "  ")])).expect("config");
        assert!(config.token.is_none());
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("mailto:parent@bloom.test"),
            Err(ConfigError::UnsupportedUrl { .. })
        ));
        for raw in ["0", "ten", "-1"] {
            let err = ClientConfig::from_lookup(lookup(&[(ENV_HTTP_TIMEOUT_SECS, raw)]))
                .expect_err("timeout rejected");
            assert!(matches!(err, ConfigError::InvalidTimeout { value } if value == raw));
        }
    }
}
