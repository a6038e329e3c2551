//! HTTP server for the deals API
//!
//! This module wires the cache into an axum application. Handlers are
//! read-only: no endpoint can trigger a fetch or mutate the cache.

pub mod api;

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cache::DealsCache;
use crate::config::ServerConfig;

use api::create_router;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Snapshot cache, written by the scheduler, read here
    pub cache: Arc<DealsCache>,

    /// Server start time, for the health endpoint
    pub start_time: Instant,
}

/// Server errors
///
/// Failure to bind the listen address is the only startup-fatal condition
/// in the whole service.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Failed to bind to the configured address
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Server terminated with an error
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Deals API server
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a server over an injected cache
    pub fn new(config: ServerConfig, cache: Arc<DealsCache>) -> Self {
        let state = AppState {
            cache,
            start_time: Instant::now(),
        };

        Self { config, state }
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes and layers
    pub fn build_router(&self) -> Router {
        create_router(self.state.clone())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http())
    }

    /// Start the server and run until the shutdown future resolves
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.config.listen_addr();

        tracing::info!(%addr, "Starting deals API server");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        tracing::info!("Deals API server shutdown complete");
        Ok(())
    }

    /// Start the server and run forever
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown(std::future::pending::<()>()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_server_creation() {
        let config = Config::default();
        let cache = Arc::new(DealsCache::new());
        let server = ApiServer::new(config.server, cache);
        let _router = server.build_router();
    }

    #[tokio::test]
    async fn test_state_shares_cache() {
        let config = Config::default();
        let cache = Arc::new(DealsCache::new());
        let server = ApiServer::new(config.server, cache.clone());

        let state = server.state();
        assert!(Arc::ptr_eq(&state.cache, &cache));
    }

    #[tokio::test]
    async fn test_bind_error_is_fatal() {
        let mut config = Config::default();
        // Resolution of .invalid hosts always fails, regardless of privileges
        config.server.host = String::from("listen.invalid");
        config.server.port = 0;

        let server = ApiServer::new(config.server, Arc::new(DealsCache::new()));
        let result = server.start_with_shutdown(std::future::ready(())).await;
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
