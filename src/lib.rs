//! dealfeed - Steam storefront deals poller and cache server
//!
//! Polls the storefront featured-categories API on a fixed interval,
//! normalizes discounted and newly-released products into one canonical
//! shape, caches the result set in memory, and serves it over a small
//! HTTP API plus a rendered landing page.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`normalizer`] - Raw record to [`models::Deal`] mapping
//! - [`fetcher`] - Upstream fetch, normalize, sort, publish
//! - [`cache`] - Locked in-memory snapshot holder
//! - [`scheduler`] - Periodic background refresh loop
//! - [`server`] - axum HTTP API and landing page
//!
//! # Example
//!
//! ```no_run
//! use dealfeed::cache::DealsCache;
//! use dealfeed::config::Config;
//! use dealfeed::fetcher::StoreFetcher;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let cache = Arc::new(DealsCache::new());
//!     let fetcher = StoreFetcher::new(&config.upstream)?;
//!     fetcher.refresh(&cache).await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod normalizer;
pub mod scheduler;
pub mod server;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::DealsCache;
    pub use crate::config::Config;
    pub use crate::error::{Error, FetchError, Result};
    pub use crate::fetcher::StoreFetcher;
    pub use crate::models::{Deal, Snapshot};
    pub use crate::scheduler::RefreshScheduler;
    pub use crate::server::ApiServer;
}

// Direct re-exports for convenience
pub use models::{Deal, Snapshot};
