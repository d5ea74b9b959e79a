//! Server configuration, read from the environment once at startup.
//!
//! The market data crate itself never touches the environment; everything
//! it needs is handed over as a `MarketDataConfig` built here.

use std::path::PathBuf;
use std::time::Duration;

use maru_market_data::MarketDataConfig;

pub struct Config {
    /// Address the HTTP server binds to
    pub listen_addr: String,

    /// Directory of static site assets (pages, embeds, styles)
    pub static_dir: String,

    /// FRED API key, if any (anonymous calls work under a stricter quota)
    pub fred_api_key: Option<String>,

    /// Alpha Vantage API key; without it the Alpha Vantage candidate is
    /// skipped without network I/O
    pub alpha_vantage_api_key: Option<String>,

    /// Per-provider request timeout in seconds
    pub request_timeout_secs: u64,

    /// Snapshot cache TTL in seconds
    pub cache_ttl_secs: u64,

    /// Path of the static last-known-good file
    pub fallback_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env_or("MARU_LISTEN_ADDR", "0.0.0.0:8080"),
            static_dir: env_or("MARU_STATIC_DIR", "static"),
            fred_api_key: non_empty_env("FRED_API_KEY"),
            alpha_vantage_api_key: non_empty_env("ALPHAVANTAGE_API_KEY"),
            request_timeout_secs: parse_env_or("MARU_REQUEST_TIMEOUT_SECS", 10),
            cache_ttl_secs: parse_env_or("MARU_CACHE_TTL_SECS", 600),
            fallback_path: env_or("MARU_FALLBACK_FILE", "data/market_fallback.json"),
        }
    }

    /// The configuration handed to the market data crate.
    pub fn market_data(&self) -> MarketDataConfig {
        MarketDataConfig {
            fred_api_key: self.fred_api_key.clone(),
            alpha_vantage_api_key: self.alpha_vantage_api_key.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            fallback_path: PathBuf::from(&self.fallback_path),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env_or(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
