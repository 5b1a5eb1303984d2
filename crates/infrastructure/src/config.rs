//! Transport configuration.
//!
//! Defaults keep the behavior of a bare client: no request timeout, so a
//! hung server hangs the calling test.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("probe/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the User-Agent.
pub const USER_AGENT_ENV: &str = "PROBE_USER_AGENT";
/// Environment variable setting the request timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "PROBE_TIMEOUT_MS";
/// Environment variable setting the connect timeout in milliseconds.
pub const CONNECT_TIMEOUT_ENV: &str = "PROBE_CONNECT_TIMEOUT_MS";

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting has a value that cannot be parsed.
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Settings for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// User-Agent header value.
    pub user_agent: String,
    /// Whole-request timeout in milliseconds. `None` waits forever.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds. `None` waits forever.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: None,
            connect_timeout_ms: None,
        }
    }
}

impl TransportConfig {
    /// Reads configuration from `PROBE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout variable is not a whole number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout variable is not a whole number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_agent) = lookup(USER_AGENT_ENV) {
            config.user_agent = user_agent;
        }
        config.timeout_ms = parse_millis(TIMEOUT_ENV, lookup(TIMEOUT_ENV))?;
        config.connect_timeout_ms = parse_millis(CONNECT_TIMEOUT_ENV, lookup(CONNECT_TIMEOUT_ENV))?;

        Ok(config)
    }

    /// Sets the User-Agent (builder pattern).
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the request timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Sets the connect timeout (builder pattern).
    #[must_use]
    pub const fn with_connect_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.connect_timeout_ms = Some(timeout_ms);
        self
    }

    /// Request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Connect timeout, if configured.
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}

fn parse_millis(key: &str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()
}
