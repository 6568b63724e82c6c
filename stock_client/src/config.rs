//! Client configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, the process
//! environment (after loading an optional `.env` file), and command-line flags.

use std::time::Duration;

use stock_common::api::DEFAULT_API_BASE;
use stock_common::{DashboardError, Result};

/// Environment variable holding the service base URL.
pub const API_BASE_ENV: &str = "STOCKS_API_BASE";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "STOCKS_API_TIMEOUT_SECS";
/// Request timeout used when nothing is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how to reach the reporting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://localhost:8000`.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Replace the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the configuration from `.env`, the environment, and CLI overrides.
    pub fn resolve(api_base: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_sources(|key| std::env::var(key).ok(), api_base, timeout_secs)
    }

    fn from_sources<F>(lookup: F, api_base: Option<String>, timeout_secs: Option<u64>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = api_base.or_else(|| lookup(API_BASE_ENV)) {
            config.api_base = base.trim().to_string();
        }

        let timeout_secs = match timeout_secs {
            Some(secs) => Some(secs),
            None => lookup(TIMEOUT_ENV)
                .map(|raw| {
                    raw.trim().parse::<u64>().map_err(|e| {
                        DashboardError::Config(format!("{TIMEOUT_ENV}={raw:?}: {e}"))
                    })
                })
                .transpose()?,
        };
        if let Some(secs) = timeout_secs {
            if secs == 0 {
                return Err(DashboardError::Config("timeout must be at least one second".into()));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "API base must be an http(s) URL, got {:?}",
                self.api_base
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_sources() {
        let config = ClientConfig::from_sources(env(&[]), None, None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base, "http://localhost:8000");
    }

    #[test]
    fn environment_overrides_defaults() {
        let lookup = env(&[(API_BASE_ENV, "https://api.example.com "), (TIMEOUT_ENV, "3")]);
        let config = ClientConfig::from_sources(lookup, None, None).unwrap();
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn flags_override_environment() {
        let lookup = env(&[(API_BASE_ENV, "https://api.example.com"), (TIMEOUT_ENV, "3")]);
        let config =
            ClientConfig::from_sources(lookup, Some("http://10.0.0.2:8000".into()), Some(30)).unwrap();
        assert_eq!(config.api_base, "http://10.0.0.2:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn bad_timeout_is_config_error() {
        let err = ClientConfig::from_sources(env(&[(TIMEOUT_ENV, "soon")]), None, None).unwrap_err();
        assert!(matches!(err, DashboardError::Config(msg) if msg.contains(TIMEOUT_ENV)));
        assert!(ClientConfig::from_sources(env(&[]), None, Some(0)).is_err());
    }

    #[test]
    fn non_http_base_is_rejected() {
        let err = ClientConfig::from_sources(env(&[]), Some("localhost:8000".into()), None).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}
