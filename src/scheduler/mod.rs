//! Periodic refresh scheduler
//!
//! One background task drives the fetcher on a fixed interval, forever,
//! independent of request traffic. The process runs a single scheduler
//! instance, so no overlap protection is needed: a fetch that outlives its
//! timeout simply delays the next tick, it never runs concurrently with it.
//!
//! Fetch failures are logged and absorbed; the loop only exits when the
//! shutdown channel fires.

use crate::cache::DealsCache;
use crate::fetcher::StoreFetcher;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Background task that refreshes the cache on a fixed period
pub struct RefreshScheduler {
    fetcher: StoreFetcher,
    cache: Arc<DealsCache>,
    period: Duration,
}

impl RefreshScheduler {
    /// Create a scheduler over an injected fetcher and cache
    pub fn new(fetcher: StoreFetcher, cache: Arc<DealsCache>, period: Duration) -> Self {
        Self {
            fetcher,
            cache,
            period,
        }
    }

    /// Run one refresh tick, absorbing any failure
    ///
    /// On failure the previous snapshot stays published and the error is
    /// only logged; nothing propagates to the caller.
    pub async fn refresh_once(&self) {
        tracing::info!("Fetching storefront specials and new releases");

        match self.fetcher.refresh(&self.cache).await {
            Ok(count) => {
                tracing::info!(count, "Published refreshed deals snapshot");
            }
            Err(e) => {
                tracing::error!(error = %e, transient = e.is_transient(), "Fetch failed, keeping previous snapshot");
            }
        }
    }

    /// Run ticks forever, until `shutdown` changes
    ///
    /// The caller is expected to have performed the initial synchronous
    /// refresh via [`refresh_once`](Self::refresh_once) before spawning
    /// this loop; the first interval tick here fires one period later.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // interval's first tick completes immediately; consume it so the
        // loop starts one full period after the caller's initial refresh
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_once().await;
                }
                _ = shutdown.changed() => {
                    tracing::info!("Refresh scheduler shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetcher::StoreFetcher;

    fn scheduler_with_endpoint(endpoint: &str, cache: Arc<DealsCache>) -> RefreshScheduler {
        let config = Config::default();
        let fetcher = StoreFetcher::with_endpoint(&config.upstream, endpoint).unwrap();
        RefreshScheduler::new(fetcher, cache, Duration::from_secs(600))
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cache_empty() {
        // Nothing listens on this port; the refresh must absorb the error.
        let cache = Arc::new(DealsCache::new());
        let scheduler = scheduler_with_endpoint("http://127.0.0.1:1/featured", cache.clone());

        scheduler.refresh_once().await;

        let snapshot = cache.read().await;
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.fetched_at, 0);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let cache = Arc::new(DealsCache::new());
        let scheduler = scheduler_with_endpoint("http://127.0.0.1:1/featured", cache);

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(scheduler.run(rx));

        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("scheduler should stop promptly after shutdown")
            .unwrap();
    }
}
