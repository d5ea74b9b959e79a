//! Maru Market Data Crate
//!
//! This crate resolves the three market indicators shown on the site —
//! the Nikkei 225 index level, the USD/JPY exchange rate and the Japan
//! 10-year government bond yield — from a set of unreliable, rate-limited,
//! partially-authenticated external providers.
//!
//! # Overview
//!
//! The crate supports:
//! - Multiple providers per indicator with a hand-curated preference order
//! - Short-circuit fallback: first successful candidate wins
//! - A static last-known-good file when every live source fails
//! - TTL memoization of the assembled snapshot
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! | SnapshotService  |  (assemble, stamp resolved_at / degraded)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  SnapshotCache   |  (single slot, TTL, whole-value swap)
//! +------------------+
//!          |  miss
//!          v
//! +------------------+
//! | FallbackResolver |  (candidates in registry order, first Ok wins)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  QuoteProvider   |  (FRED, Alpha Vantage, Yahoo chart)
//! +------------------+
//!          |  all failed
//!          v
//! +------------------+
//! | StaticFallback   |  (local JSON file, read-only, degraded=true)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Indicator`] - Logical indicator identity (equity index, FX rate, bond yield)
//! - [`Observation`] - One resolved numeric value with unit and provenance
//! - [`Snapshot`] - Immutable result of one resolution cycle
//! - [`MarketDataConfig`] - Injected configuration (keys, timeout, TTL, fallback path)

pub mod cache;
pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod snapshot;

// Re-export all public types from models
pub use models::{Indicator, Observation, ProviderId, Snapshot, Unit};

// Re-export provider types
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::fred::FredProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::QuoteProvider;

// Re-export the resolution pipeline
pub use cache::SnapshotCache;
pub use config::MarketDataConfig;
pub use errors::MarketDataError;
pub use registry::{candidates, Candidate};
pub use resolver::{FallbackResolver, IndicatorResolution, StaticFallback, STATIC_SOURCE};
pub use snapshot::SnapshotService;
