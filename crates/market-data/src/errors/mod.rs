//! Error types for the market data crate.
//!
//! Every provider failure is non-fatal to snapshot resolution: the resolver
//! converts each one into "try the next candidate", and only a fully
//! exhausted indicator surfaces - as [`MarketDataError::AllProvidersExhausted`]
//! to direct resolver callers, or as an absent slot in the snapshot. There is
//! no retry classification: this design never retries a failed candidate
//! within a resolution cycle.

use thiserror::Error;

/// Errors that can occur while fetching one observation from one provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider requires an API key and none is configured.
    /// Returned before any network I/O is attempted.
    #[error("Provider not configured: {provider} (missing API key)")]
    Unconfigured {
        /// The provider missing its credential
        provider: String,
    },

    /// Network-level failure: DNS, connection, TLS, or a non-success
    /// HTTP status from the provider.
    #[error("Transport failure: {provider} - {message}")]
    Transport {
        /// The provider that failed
        provider: String,
        /// What went wrong
        message: String,
    },

    /// The request exceeded the configured per-request timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The response arrived but did not have the expected shape:
    /// missing field, non-numeric value, or a missing-datum marker.
    #[error("Unexpected response shape: {provider} - {message}")]
    Parse {
        /// The provider whose response could not be parsed
        provider: String,
        /// What was wrong with the body
        message: String,
    },

    /// Every candidate for an indicator failed. Surfaces only from the
    /// live-resolution path; the full resolver still consults the static
    /// fallback after this.
    #[error("All providers exhausted for {indicator}")]
    AllProvidersExhausted {
        /// The indicator that could not be resolved live
        indicator: String,
    },
}

impl MarketDataError {
    /// Map a reqwest error to the taxonomy: elapsed timeouts become
    /// [`Timeout`](Self::Timeout), everything else [`Transport`](Self::Transport).
    pub(crate) fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::Transport {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }
}
