//! Fallback resolver: walk an indicator's candidates in registry order and
//! keep the first success.
//!
//! Every provider failure is caught here and converted into "try the next
//! candidate" - nothing propagates to the caller as a hard error. When all
//! candidates fail, the static fallback record is consulted; when that is
//! also silent, the indicator resolves to an explicit absent value, never a
//! placeholder numeric.
//!
//! There is no retry, no backoff, and no averaging across providers: first
//! success wins, and a failed candidate stays abandoned until the next
//! cache-refresh cycle re-walks the list from the top.

mod static_fallback;

pub use static_fallback::{StaticFallback, STATIC_SOURCE};

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{Indicator, Observation};
use crate::provider::QuoteProvider;
use crate::registry;

/// Outcome of resolving one indicator.
#[derive(Clone, Debug)]
pub struct IndicatorResolution {
    /// The resolved observation, or `None` when no live source and no
    /// static fallback could supply a value.
    pub observation: Option<Observation>,

    /// True when the value did not come from a live provider: either it was
    /// served from the static fallback or it is absent entirely.
    pub degraded: bool,
}

/// Resolves indicators against live providers with a static last resort.
pub struct FallbackResolver {
    providers: HashMap<&'static str, Arc<dyn QuoteProvider>>,
    fallback: StaticFallback,
}

impl FallbackResolver {
    /// Create a resolver over a set of providers.
    ///
    /// Providers are keyed by their `id()`; registry candidates reference
    /// them by the same constant.
    pub fn new(providers: Vec<Arc<dyn QuoteProvider>>, fallback: StaticFallback) -> Self {
        let providers = providers.into_iter().map(|p| (p.id(), p)).collect();
        Self {
            providers,
            fallback,
        }
    }

    /// Try the candidates for an indicator in registry order.
    ///
    /// Short-circuits on the first success; later candidates are never
    /// invoked. Errors with [`MarketDataError::AllProvidersExhausted`] once
    /// the list is spent - callers wanting the static fallback use
    /// [`resolve`](Self::resolve) instead.
    pub async fn resolve_live(
        &self,
        indicator: Indicator,
    ) -> Result<Observation, MarketDataError> {
        for candidate in registry::candidates(indicator) {
            let Some(provider) = self.providers.get(candidate.provider) else {
                debug!(
                    "no provider registered as '{}', skipping candidate {}",
                    candidate.provider, candidate.code
                );
                continue;
            };

            match provider.fetch(candidate.code, candidate.unit).await {
                Ok(observation) => {
                    debug!(
                        "{}: resolved from {} ({})",
                        indicator.key(),
                        candidate.provider,
                        candidate.code
                    );
                    return Ok(observation);
                }
                Err(e) => {
                    warn!(
                        "{}: candidate {}:{} failed ({}), trying next",
                        indicator.key(),
                        candidate.provider,
                        candidate.code,
                        e
                    );
                }
            }
        }

        Err(MarketDataError::AllProvidersExhausted {
            indicator: indicator.key().to_string(),
        })
    }

    /// Resolve an indicator, falling back to the static record when every
    /// live candidate fails.
    pub async fn resolve(&self, indicator: Indicator) -> IndicatorResolution {
        match self.resolve_live(indicator).await {
            Ok(observation) => IndicatorResolution {
                observation: Some(observation),
                degraded: false,
            },
            Err(e) => {
                warn!("{}, consulting static fallback", e);
                match self.fallback.lookup(indicator) {
                    Some(value) => IndicatorResolution {
                        observation: Some(Observation::new(
                            value,
                            indicator.unit(),
                            STATIC_SOURCE,
                        )),
                        degraded: true,
                    },
                    None => {
                        warn!(
                            "{}: no static fallback value either, reporting absent",
                            indicator.key()
                        );
                        IndicatorResolution {
                            observation: None,
                            degraded: true,
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum MockBehavior {
        Succeed(Decimal),
        Timeout,
        Unconfigured,
    }

    struct MockProvider {
        id: &'static str,
        call_count: AtomicUsize,
        behavior: MockBehavior,
    }

    impl MockProvider {
        fn new(id: &'static str, behavior: MockBehavior) -> Arc<Self> {
            Arc::new(Self {
                id,
                call_count: AtomicUsize::new(0),
                behavior,
            })
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuoteProvider for MockProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn fetch(&self, _code: &str, unit: Unit) -> Result<Observation, MarketDataError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            match self.behavior {
                MockBehavior::Succeed(value) => Ok(Observation::new(value, unit, self.id)),
                MockBehavior::Timeout => Err(MarketDataError::Timeout {
                    provider: self.id.to_string(),
                }),
                MockBehavior::Unconfigured => Err(MarketDataError::Unconfigured {
                    provider: self.id.to_string(),
                }),
            }
        }
    }

    fn fallback_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn resolver_with(
        providers: Vec<Arc<dyn QuoteProvider>>,
        fallback: &tempfile::NamedTempFile,
    ) -> FallbackResolver {
        FallbackResolver::new(providers, StaticFallback::new(fallback.path()))
    }

    // Registry order for EquityIndex is FRED then YAHOO; the mocks below
    // impersonate those ids so the real candidate table drives the walk.

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let primary = MockProvider::new("FRED", MockBehavior::Succeed(dec!(41000.5)));
        let secondary = MockProvider::new("YAHOO", MockBehavior::Succeed(dec!(40000)));
        let file = fallback_file("{}");
        let resolver = resolver_with(vec![
            primary.clone() as Arc<dyn QuoteProvider>,
            secondary.clone() as Arc<dyn QuoteProvider>,
        ], &file);

        let resolution = resolver.resolve(Indicator::EquityIndex).await;

        let observation = resolution.observation.unwrap();
        assert_eq!(observation.value, dec!(41000.5));
        assert_eq!(observation.source, "FRED");
        assert!(!resolution.degraded);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_moves_to_next_candidate() {
        let primary = MockProvider::new("FRED", MockBehavior::Timeout);
        let secondary = MockProvider::new("YAHOO", MockBehavior::Succeed(dec!(41000.5)));
        let file = fallback_file("{}");
        let resolver = resolver_with(vec![
            primary.clone() as Arc<dyn QuoteProvider>,
            secondary.clone() as Arc<dyn QuoteProvider>,
        ], &file);

        let resolution = resolver.resolve(Indicator::EquityIndex).await;

        let observation = resolution.observation.unwrap();
        assert_eq!(observation.value, dec!(41000.5));
        assert_eq!(observation.source, "YAHOO");
        assert!(!resolution.degraded);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_candidate_is_skipped_over() {
        let primary = MockProvider::new("ALPHA_VANTAGE", MockBehavior::Unconfigured);
        let secondary = MockProvider::new("YAHOO", MockBehavior::Succeed(dec!(148.2)));
        let file = fallback_file("{}");
        let resolver = resolver_with(vec![
            primary.clone() as Arc<dyn QuoteProvider>,
            secondary.clone() as Arc<dyn QuoteProvider>,
        ], &file);

        let resolution = resolver.resolve(Indicator::FxRate).await;

        assert_eq!(resolution.observation.unwrap().source, "YAHOO");
        assert!(!resolution.degraded);
    }

    #[tokio::test]
    async fn test_exhaustion_uses_static_fallback() {
        let primary = MockProvider::new("ALPHA_VANTAGE", MockBehavior::Timeout);
        let secondary = MockProvider::new("YAHOO", MockBehavior::Timeout);
        let file = fallback_file(r#"{"fx_rate": 148.2}"#);
        let resolver = resolver_with(vec![
            primary as Arc<dyn QuoteProvider>,
            secondary as Arc<dyn QuoteProvider>,
        ], &file);

        let resolution = resolver.resolve(Indicator::FxRate).await;

        let observation = resolution.observation.unwrap();
        assert_eq!(observation.value, dec!(148.2));
        assert_eq!(observation.source, "STATIC");
        assert_eq!(observation.unit, Unit::Rate);
        assert!(observation.observed_at.is_none());
        assert!(resolution.degraded);
    }

    #[tokio::test]
    async fn test_exhaustion_without_fallback_is_absent() {
        let primary = MockProvider::new("FRED", MockBehavior::Timeout);
        let secondary = MockProvider::new("YAHOO", MockBehavior::Timeout);
        let file = fallback_file("{}");
        let resolver = resolver_with(vec![
            primary as Arc<dyn QuoteProvider>,
            secondary as Arc<dyn QuoteProvider>,
        ], &file);

        let resolution = resolver.resolve(Indicator::BondYield).await;

        // Absent, never a numeric default.
        assert!(resolution.observation.is_none());
        assert!(resolution.degraded);
    }

    #[tokio::test]
    async fn test_resolve_live_reports_exhaustion() {
        let file = fallback_file(r#"{"bond_yield": 1.05}"#);
        let resolver = resolver_with(Vec::new(), &file);

        let err = resolver.resolve_live(Indicator::BondYield).await.unwrap_err();
        assert!(matches!(
            err,
            MarketDataError::AllProvidersExhausted { .. }
        ));
    }
}
