//! Suite configuration.
//!
//! Every setting has a built-in default pointing at the public Story Spoiler
//! deployment; environment variables override them one by one.

use std::time::Duration;

use spoiler_domain::Credentials;
use thiserror::Error;
use url::Url;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://d3s5nxhwblsjbi.cloudfront.net";
/// Default account name.
pub const DEFAULT_USERNAME: &str = "ico1";
/// Default account password.
pub const DEFAULT_PASSWORD: &str = "ico1ico1";
/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Environment variable overriding the API root.
pub const ENV_BASE_URL: &str = "SPOILER_BASE_URL";
/// Environment variable overriding the account name.
pub const ENV_USERNAME: &str = "SPOILER_USERNAME";
/// Environment variable overriding the account password.
pub const ENV_PASSWORD: &str = "SPOILER_PASSWORD";
/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT_MS: &str = "SPOILER_TIMEOUT_MS";

/// Errors raised while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL does not parse or is not http(s).
    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidBaseUrl {
        /// Variable the value came from.
        var: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The timeout is not a positive integer.
    #[error("{var} must be a positive number of milliseconds, got '{value}'")]
    InvalidTimeout {
        /// Variable the value came from.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Settings for one suite run.
#[derive(Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// API root every case path is resolved against.
    pub base_url: Url,
    /// Account used for the login step.
    pub username: String,
    /// Password for `username`.
    pub password: String,
    /// Per-request timeout.
    pub timeout_ms: u64,
}

impl SuiteConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` to resolve each variable.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BASE_URL) {
            config.base_url = parse_base_url(ENV_BASE_URL, &raw)?;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            config.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            config.password = password;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: ENV_TIMEOUT_MS,
                        value: raw,
                    });
                }
            };
        }

        Ok(config)
    }

    /// Returns a copy pointing at another API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Login credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

impl Default for SuiteConfig {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl std::fmt::Debug for SuiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteConfig")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn parse_base_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidBaseUrl {
        var,
        value: raw.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(invalid()),
    }
}
