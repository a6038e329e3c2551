//! REST API handlers for the deals server
//!
//! This module defines the API routes and handlers. Everything is
//! read-only against the cache.

use axum::{
    extract::State,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::models::Deal;

use super::AppState;

/// Static landing page, embedded at build time
///
/// The page renders the deals client-side from `/api/deals`.
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Response body for `GET /api/deals`
#[derive(Debug, Serialize)]
pub struct DealsResponse {
    /// Unix timestamp of the last successful fetch, 0 if never
    pub last_fetch: i64,

    /// Number of items in the snapshot
    pub count: usize,

    /// Normalized deals, sorted by discount descending
    pub items: Vec<Deal>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/deals", get(api_deals))
        .route("/health", get(health))
        .with_state(state)
}

/// `GET /` - static landing page
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /api/deals` - current cache snapshot
async fn api_deals(State(state): State<AppState>) -> Json<DealsResponse> {
    let snapshot = state.cache.read().await;

    Json(DealsResponse {
        last_fetch: snapshot.fetched_at,
        count: snapshot.items.len(),
        items: snapshot.items,
    })
}

/// `GET /health` - liveness probe
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
