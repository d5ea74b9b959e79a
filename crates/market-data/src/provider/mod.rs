//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that all providers implement
//! - Concrete adapters: FRED, Alpha Vantage, Yahoo chart
//!
//! Each adapter owns its upstream's request shape (query parameters, auth
//! placement) and response shape (the nested JSON field holding the number),
//! and converts both into the common `Observation`/`MarketDataError` types.
//! The resolver selects adapters via the registry; no provider-specific
//! conditionals exist outside this module.

mod traits;

pub mod alpha_vantage;
pub mod fred;
pub mod yahoo;

pub use traits::QuoteProvider;
