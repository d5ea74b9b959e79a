//! Injected configuration for the market data subsystem.
//!
//! Credentials and tunables are passed in explicitly at construction rather
//! than looked up from ambient process state; the binary decides where they
//! come from (environment, `.env`, flags) and reads them once at startup.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for [`SnapshotService`](crate::SnapshotService) and the
/// provider clients it constructs.
#[derive(Clone, Debug)]
pub struct MarketDataConfig {
    /// FRED API key. Optional: FRED accepts anonymous calls under a
    /// stricter quota, so candidates are still attempted without one.
    pub fred_api_key: Option<String>,

    /// Alpha Vantage API key. Required by that provider: without it the
    /// Alpha Vantage candidate short-circuits to `Unconfigured` and no
    /// request is made.
    pub alpha_vantage_api_key: Option<String>,

    /// Per-request timeout applied to every provider call.
    pub request_timeout: Duration,

    /// How long an assembled snapshot is served from cache.
    pub cache_ttl: Duration,

    /// Path to the static last-known-good file. Read-only at runtime,
    /// replaced out-of-band.
    pub fallback_path: PathBuf,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            fred_api_key: None,
            alpha_vantage_api_key: None,
            // Stays well under free-tier rate limits while keeping the
            // displayed values reasonably current.
            request_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(600),
            fallback_path: PathBuf::from("data/market_fallback.json"),
        }
    }
}
