//! In-memory snapshot cache
//!
//! Holds the last published [`Snapshot`] behind a lock. The scheduler is
//! the sole writer; HTTP handlers are readers. The lock is held only for
//! the clone or the swap, never across network or parse work, so readers
//! always observe a fully-formed snapshot.
//!
//! The cache is an explicitly owned object shared via `Arc`, not ambient
//! process-wide state.

use crate::models::Snapshot;
use tokio::sync::RwLock;

/// Process-wide holder of the last published result set
#[derive(Debug)]
pub struct DealsCache {
    inner: RwLock<Snapshot>,
}

impl DealsCache {
    /// Create an empty cache (`fetched_at == 0`, no items)
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Snapshot::empty()),
        }
    }

    /// Return a consistent copy of the current snapshot
    pub async fn read(&self) -> Snapshot {
        self.inner.read().await.clone()
    }

    /// Replace the held snapshot wholesale
    ///
    /// No per-item mutation, no history: the previous snapshot remains
    /// visible to readers until this swap completes.
    pub async fn publish(&self, snapshot: Snapshot) {
        *self.inner.write().await = snapshot;
    }
}

impl Default for DealsCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Deal;
    use std::sync::Arc;

    fn deal_with_discount(discount: u32) -> Deal {
        Deal {
            id: Some(u64::from(discount)),
            name: Some(format!("game-{discount}")),
            discount_percent: discount,
            initial: None,
            final_price: None,
            currency: "UAH".to_string(),
            large_capsule: "https://cdn/x.jpg".to_string(),
            store_link: None,
        }
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let cache = DealsCache::new();
        let snapshot = cache.read().await;
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.fetched_at, 0);
    }

    #[tokio::test]
    async fn test_publish_replaces_wholesale() {
        let cache = DealsCache::new();

        cache
            .publish(Snapshot {
                items: vec![deal_with_discount(10), deal_with_discount(20)],
                fetched_at: 100,
            })
            .await;

        cache
            .publish(Snapshot {
                items: vec![deal_with_discount(30)],
                fetched_at: 200,
            })
            .await;

        let snapshot = cache.read().await;
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.fetched_at, 200);
    }

    /// Readers must never see a snapshot whose item count disagrees with
    /// its timestamp, no matter how writes interleave.
    #[tokio::test]
    async fn test_concurrent_reads_see_consistent_snapshots() {
        let cache = Arc::new(DealsCache::new());

        let writer = {
            let cache = cache.clone();
            tokio::spawn(async move {
                for i in 1..=50i64 {
                    let items = (0..i).map(|_| deal_with_discount(1)).collect();
                    cache
                        .publish(Snapshot {
                            items,
                            fetched_at: i,
                        })
                        .await;
                    tokio::task::yield_now().await;
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for _ in 0..100 {
                        let snapshot = cache.read().await;
                        assert_eq!(
                            snapshot.items.len() as i64,
                            snapshot.fetched_at,
                            "snapshot items and timestamp must match"
                        );
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
