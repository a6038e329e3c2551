//! Configuration management for the dealfeed service
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Everything is fixed at startup; there is no
//! runtime reload.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream storefront configuration
    pub upstream: UpstreamConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Upstream storefront configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Featured-categories endpoint URL
    pub endpoint: String,

    /// Locale code sent as the `l` query parameter
    pub locale: String,

    /// Country code sent as the `cc` query parameter
    pub country: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Seconds between refresh ticks
    pub refresh_interval_secs: u64,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,

    /// Listen port
    pub port: u16,
}

impl ServerConfig {
    /// Listen address in `host:port` form
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("DEALFEED_UPSTREAM_URL")
            .unwrap_or_else(|_| String::from(defaults::UPSTREAM_URL));

        let locale =
            std::env::var("DEALFEED_LOCALE").unwrap_or_else(|_| String::from(defaults::LOCALE));

        let country =
            std::env::var("DEALFEED_COUNTRY").unwrap_or_else(|_| String::from(defaults::COUNTRY));

        let request_timeout_secs = std::env::var("DEALFEED_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);

        let refresh_interval_secs = std::env::var("DEALFEED_REFRESH_INTERVAL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::REFRESH_INTERVAL_SECS);

        let host = std::env::var("DEALFEED_HOST").unwrap_or_else(|_| String::from(defaults::HOST));

        let port = std::env::var("DEALFEED_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults::PORT);

        let log_level = std::env::var("DEALFEED_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("DEALFEED_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            upstream: UpstreamConfig {
                endpoint,
                locale,
                country,
                request_timeout_secs,
                refresh_interval_secs,
            },
            server: ServerConfig { host, port },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.upstream.endpoint)
            .with_context(|| format!("Invalid upstream endpoint: {}", self.upstream.endpoint))?;

        if self.upstream.locale.is_empty() {
            anyhow::bail!("locale must not be empty");
        }

        if self.upstream.country.is_empty() {
            anyhow::bail!("country must not be empty");
        }

        if self.upstream.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.upstream.refresh_interval_secs == 0 {
            anyhow::bail!("refresh_interval_secs must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.request_timeout_secs)
    }

    /// Get refresh interval as Duration
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.upstream.refresh_interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig {
                endpoint: String::from(defaults::UPSTREAM_URL),
                locale: String::from(defaults::LOCALE),
                country: String::from(defaults::COUNTRY),
                request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
                refresh_interval_secs: defaults::REFRESH_INTERVAL_SECS,
            },
            server: ServerConfig {
                host: String::from(defaults::HOST),
                port: defaults::PORT,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

/// Built-in defaults, overridable via environment or config file
pub mod defaults {
    pub const UPSTREAM_URL: &str = "https://store.steampowered.com/api/featuredcategories/";
    pub const LOCALE: &str = "english";
    pub const COUNTRY: &str = "UA";
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    pub const REFRESH_INTERVAL_SECS: u64 = 600;
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 5755;
}
