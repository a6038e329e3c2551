//! Error types for the dealfeed service
//!
//! Fetch failures get their own domain enum because the scheduler treats
//! them all the same way (log and wait for the next tick); the unified
//! [`Error`] wraps everything that can cross a module boundary.

use std::io;
use thiserror::Error;

/// Errors that can occur while fetching the storefront feed
///
/// Any of these variants aborts the current tick without touching the
/// cache; none of them is fatal to the process.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body did not decode as the expected shape
    #[error("Malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

impl FetchError {
    /// Whether the next scheduled tick can reasonably succeed
    ///
    /// Everything except a malformed body is transient; a shape change in
    /// the upstream payload will not fix itself by waiting.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Malformed(_))
    }
}

/// Unified error type for the dealfeed crate
#[derive(Error, Debug)]
pub enum Error {
    /// Feed fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
