//! Single-slot TTL cache for the assembled snapshot.
//!
//! All three indicators resolve together, so one entry covers the whole
//! snapshot. A hit within the TTL serves the stored value without touching
//! any provider; a miss or expiry recomputes and swaps the entry whole, so
//! readers never observe a partially updated snapshot.
//!
//! The lock is not held across the compute await. Requests racing after an
//! expiry may each recompute and each hit upstream - an accepted tradeoff,
//! since provider calls are cheap idempotent reads and the window is one
//! resolution wide. There is no single-flight de-duplication.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::models::Snapshot;

struct CacheEntry {
    snapshot: Arc<Snapshot>,
    stored_at: Instant,
}

/// Memoizes the most recent snapshot for a bounded time window.
pub struct SnapshotCache {
    slot: RwLock<Option<CacheEntry>>,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Return the cached snapshot if fresh, otherwise run `compute`, store
    /// its result with a new timestamp, and return it.
    pub async fn get_or_compute<F, Fut>(&self, compute: F) -> Arc<Snapshot>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Snapshot>,
    {
        {
            let guard = self.slot.read().await;
            if let Some(entry) = guard.as_ref() {
                if entry.stored_at.elapsed() < self.ttl {
                    return Arc::clone(&entry.snapshot);
                }
            }
        }

        let snapshot = Arc::new(compute().await);

        let mut guard = self.slot.write().await;
        *guard = Some(CacheEntry {
            snapshot: Arc::clone(&snapshot),
            stored_at: Instant::now(),
        });

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn empty_snapshot() -> Snapshot {
        Snapshot::new(BTreeMap::new(), false)
    }

    #[tokio::test]
    async fn test_hit_within_ttl_skips_compute() {
        let cache = SnapshotCache::new(Duration::from_secs(600));
        let computes = AtomicUsize::new(0);

        let first = cache
            .get_or_compute(|| async {
                computes.fetch_add(1, Ordering::SeqCst);
                empty_snapshot()
            })
            .await;
        let second = cache
            .get_or_compute(|| async {
                computes.fetch_add(1, Ordering::SeqCst);
                empty_snapshot()
            })
            .await;

        assert_eq!(computes.load(Ordering::SeqCst), 1);
        // Bit-identical: the same stored snapshot, same resolution stamp.
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.resolved_at, second.resolved_at);
    }

    #[tokio::test]
    async fn test_expiry_recomputes_with_newer_stamp() {
        let cache = SnapshotCache::new(Duration::from_secs(10));

        let first = cache.get_or_compute(|| async { empty_snapshot() }).await;

        // Backdate the stored entry past the TTL.
        {
            let mut guard = cache.slot.write().await;
            guard.as_mut().unwrap().stored_at = Instant::now() - Duration::from_secs(11);
        }

        let second = cache.get_or_compute(|| async { empty_snapshot() }).await;

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(second.resolved_at >= first.resolved_at);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_recomputes() {
        let cache = SnapshotCache::new(Duration::ZERO);
        let computes = AtomicUsize::new(0);

        for _ in 0..3 {
            cache
                .get_or_compute(|| async {
                    computes.fetch_add(1, Ordering::SeqCst);
                    empty_snapshot()
                })
                .await;
        }

        assert_eq!(computes.load(Ordering::SeqCst), 3);
    }
}
