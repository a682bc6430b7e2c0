//! Proxy configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://gd.ayasglobe.com/api";
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error("invalid upstream base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub port: u16,
    /// Upstream API root without a trailing slash; route paths are appended.
    pub upstream_base_url: String,
    /// Whole-request timeout for upstream calls. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Duration,
}

impl ProxyConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `UPSTREAM_BASE_URL`: default `https://gd.ayasglobe.com/api`
    /// - `UPSTREAM_TIMEOUT_SECS`: unset means no request timeout
    /// - `UPSTREAM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ProxyConfig::from_env`] over an arbitrary lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set but cannot be parsed.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);

        let raw_url = lookup("UPSTREAM_BASE_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_owned());
        let upstream_base_url = raw_url.trim().trim_end_matches('/').to_owned();
        if !(upstream_base_url.starts_with("http://") || upstream_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(raw_url));
        }

        let request_timeout = parse_var::<u64, _>(&lookup, "UPSTREAM_TIMEOUT_SECS")?.map(Duration::from_secs);
        let connect_timeout = Duration::from_secs(
            parse_var(&lookup, "UPSTREAM_CONNECT_TIMEOUT_SECS")?.unwrap_or(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS),
        );

        Ok(Self { port, upstream_base_url, request_timeout, connect_timeout })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}
