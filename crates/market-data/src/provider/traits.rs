//! Quote provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Observation, Unit};

/// Trait for external quote sources.
///
/// Implement this trait to add support for a new data source. A call is one
/// bounded-time request for one instrument; retry and fallback policy belong
/// to the resolver, never to a provider.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use maru_market_data::{MarketDataError, Observation, QuoteProvider, Unit};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl QuoteProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn fetch(&self, code: &str, unit: Unit) -> Result<Observation, MarketDataError> {
///         // one request, one parsed observation
///         # unimplemented!()
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// A constant string like "FRED" or "YAHOO", used for logging and as
    /// the observation's source tag.
    fn id(&self) -> &'static str;

    /// Fetch the latest observation for an instrument.
    ///
    /// # Arguments
    ///
    /// * `code` - Provider-scoped instrument identifier (opaque here; its
    ///   meaning is fixed by the registry entry that named it)
    /// * `unit` - Unit the registry says this candidate quotes in; stamped
    ///   onto the returned observation
    ///
    /// # Returns
    ///
    /// The latest observation on success, or a `MarketDataError` on failure.
    /// Implementations make at most one outbound request per invocation, and
    /// none at all when a required credential is missing.
    async fn fetch(&self, code: &str, unit: Unit) -> Result<Observation, MarketDataError>;
}
