//! Snapshot assembler: the consumer-facing surface of the crate.
//!
//! `SnapshotService::get_snapshot` is the only read interface the display
//! layer uses. It is infallible by design - provider trouble degrades the
//! snapshot (static values, absent slots) but never surfaces as an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::info;

use crate::cache::SnapshotCache;
use crate::config::MarketDataConfig;
use crate::models::{Indicator, Snapshot};
use crate::provider::alpha_vantage::AlphaVantageProvider;
use crate::provider::fred::FredProvider;
use crate::provider::yahoo::YahooProvider;
use crate::provider::QuoteProvider;
use crate::resolver::{FallbackResolver, StaticFallback};

/// Assembles snapshots of the three indicators, memoized behind a TTL cache.
pub struct SnapshotService {
    resolver: Arc<FallbackResolver>,
    cache: SnapshotCache,
}

impl SnapshotService {
    /// Wire up the full production pipeline from configuration.
    ///
    /// All three providers are always constructed; the ones missing a
    /// required credential reject their candidates without network I/O.
    pub fn new(config: &MarketDataConfig) -> Self {
        let providers: Vec<Arc<dyn QuoteProvider>> = vec![
            Arc::new(FredProvider::new(
                config.fred_api_key.clone(),
                config.request_timeout,
            )),
            Arc::new(AlphaVantageProvider::new(
                config.alpha_vantage_api_key.clone(),
                config.request_timeout,
            )),
            Arc::new(YahooProvider::new(config.request_timeout)),
        ];
        let fallback = StaticFallback::new(config.fallback_path.clone());
        let resolver = Arc::new(FallbackResolver::new(providers, fallback));

        Self::with_resolver(resolver, config.cache_ttl)
    }

    /// Build a service over an existing resolver. Used by `new` and by
    /// tests that substitute providers.
    pub fn with_resolver(
        resolver: Arc<FallbackResolver>,
        cache_ttl: std::time::Duration,
    ) -> Self {
        Self {
            resolver,
            cache: SnapshotCache::new(cache_ttl),
        }
    }

    /// The current snapshot: cached if fresh, freshly assembled otherwise.
    ///
    /// Always returns a snapshot; an indicator that could not be resolved
    /// at all is simply absent from it.
    pub async fn get_snapshot(&self) -> Arc<Snapshot> {
        let resolver = Arc::clone(&self.resolver);
        self.cache
            .get_or_compute(move || async move { Self::assemble(&resolver).await })
            .await
    }

    /// Resolve all indicators and assemble a fresh snapshot.
    ///
    /// Indicators are independent: each gets its own candidate walk, and
    /// one failing never affects the others. Attempts are sequential -
    /// speculative parallel calls would multiply load on rate-limited free
    /// tiers for no correctness benefit.
    async fn assemble(resolver: &FallbackResolver) -> Snapshot {
        let mut indicators = BTreeMap::new();
        let mut degraded = false;

        for indicator in Indicator::ALL {
            let resolution = resolver.resolve(indicator).await;
            degraded |= resolution.degraded;
            if let Some(observation) = resolution.observation {
                indicators.insert(indicator, observation);
            }
        }

        let snapshot = Snapshot::new(indicators, degraded);
        info!(
            "assembled snapshot: {}/{} indicators, degraded={}",
            snapshot.indicators.len(),
            Indicator::ALL.len(),
            snapshot.degraded
        );
        snapshot
    }
}
