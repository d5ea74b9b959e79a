//! Alpha Vantage provider implementation.
//!
//! Fetches a realtime currency quote via the CURRENCY_EXCHANGE_RATE
//! function. Used for USD/JPY.
//!
//! An API key is required. Constructed without one, `fetch` returns
//! `Unconfigured` before any network I/O: there is no anonymous quota to
//! spend and no point in a round-trip that will be rejected.
//! The free tier is limited to a handful of calls per minute; throttle
//! responses arrive as HTTP 200 with a "Note"/"Information" body and are
//! surfaced as transport failures.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{Observation, Unit};
use crate::provider::QuoteProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Stable id of this provider, as referenced by the registry.
pub const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage currency-quote provider.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: Option<String>,
}

// ============================================================================
// Response structures for the Alpha Vantage API
// ============================================================================

#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    #[serde(rename = "Realtime Currency Exchange Rate")]
    exchange_rate: Option<RealtimeExchangeRate>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RealtimeExchangeRate {
    #[serde(rename = "5. Exchange Rate")]
    exchange_rate: String,
    #[serde(rename = "6. Last Refreshed")]
    last_refreshed: Option<String>,
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider.
    ///
    /// `api_key` gates the provider entirely: `None` makes every `fetch`
    /// return `Unconfigured` without touching the network.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a request to the Alpha Vantage API.
    async fn fetch_text(
        &self,
        api_key: &str,
        from: &str,
        to: &str,
    ) -> Result<String, MarketDataError> {
        let params = [
            ("function", "CURRENCY_EXCHANGE_RATE"),
            ("from_currency", from),
            ("to_currency", to),
            ("apikey", api_key),
        ];

        let url = reqwest::Url::parse_with_params(BASE_URL, &params).map_err(|e| {
            MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(api_key, "***")
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketDataError::from_reqwest(PROVIDER_ID, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: "rate limited (HTTP 429)".to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::from_reqwest(PROVIDER_ID, e))
    }

    /// Parse the realtime exchange rate out of a response body.
    fn parse_rate(text: &str) -> Result<(Decimal, Option<DateTime<Utc>>), MarketDataError> {
        let response: ExchangeRateResponse =
            serde_json::from_str(text).map_err(|e| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let rate = response
            .exchange_rate
            .ok_or_else(|| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: "missing \"Realtime Currency Exchange Rate\" object".to_string(),
            })?;

        let value =
            Decimal::from_str(&rate.exchange_rate).map_err(|_| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("non-numeric exchange rate: {:?}", rate.exchange_rate),
            })?;

        let observed_at = rate
            .last_refreshed
            .as_deref()
            .and_then(Self::parse_timestamp);

        Ok((value, observed_at))
    }

    /// Check for API-level errors in the response.
    ///
    /// The free tier reports throttling as an HTTP 200 with a "Note" or
    /// "Information" field instead of a status code.
    fn check_api_error(
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(ref msg) = error_message {
            return Err(MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        for msg in [note, information].into_iter().flatten() {
            if msg.contains("API call frequency")
                || msg.contains("rate limit")
                || msg.contains("API rate limit")
            {
                return Err(MarketDataError::Transport {
                    provider: PROVIDER_ID.to_string(),
                    message: "rate limited (free tier)".to_string(),
                });
            }
            warn!("Alpha Vantage note: {}", msg);
        }

        Ok(())
    }

    /// Parse a "YYYY-MM-DD HH:MM:SS" timestamp (Alpha Vantage reports UTC).
    fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .ok()
            .and_then(|dt| Utc.from_local_datetime(&dt).single())
    }

    /// Split a registry code like "USD/JPY" into its currency pair.
    fn split_pair(code: &str) -> Result<(&str, &str), MarketDataError> {
        code.split_once('/').ok_or_else(|| MarketDataError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: format!("instrument code is not a currency pair: {:?}", code),
        })
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, code: &str, unit: Unit) -> Result<Observation, MarketDataError> {
        // Credential gate comes first: no key, no I/O.
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            MarketDataError::Unconfigured {
                provider: PROVIDER_ID.to_string(),
            }
        })?;

        let (from, to) = Self::split_pair(code)?;
        let text = self.fetch_text(api_key, from, to).await?;
        let (value, observed_at) = Self::parse_rate(&text)?;

        debug!("Alpha Vantage: {}/{} = {}", from, to, value);

        Ok(match observed_at {
            Some(at) => Observation::observed(value, unit, PROVIDER_ID, at),
            None => Observation::new(value, unit, PROVIDER_ID),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_rate() {
        let json = r#"{
            "Realtime Currency Exchange Rate": {
                "1. From_Currency Code": "USD",
                "2. From_Currency Name": "United States Dollar",
                "3. To_Currency Code": "JPY",
                "4. To_Currency Name": "Japanese Yen",
                "5. Exchange Rate": "148.20000000",
                "6. Last Refreshed": "2026-08-08 09:30:01",
                "7. Time Zone": "UTC",
                "8. Bid Price": "148.19900000",
                "9. Ask Price": "148.20100000"
            }
        }"#;

        let (value, observed_at) = AlphaVantageProvider::parse_rate(json).unwrap();
        assert_eq!(value, dec!(148.2));
        assert!(observed_at.is_some());
    }

    #[test]
    fn test_parse_throttle_note_is_transport() {
        let json = r#"{
            "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 25 requests per day."
        }"#;

        let err = AlphaVantageProvider::parse_rate(json).unwrap_err();
        assert!(matches!(err, MarketDataError::Transport { .. }));
    }

    #[test]
    fn test_parse_error_message() {
        let json = r#"{"Error Message": "Invalid API call."}"#;

        let err = AlphaVantageProvider::parse_rate(json).unwrap_err();
        assert!(matches!(err, MarketDataError::Transport { .. }));
    }

    #[test]
    fn test_parse_missing_rate_object() {
        let err = AlphaVantageProvider::parse_rate("{}").unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { .. }));
    }

    #[test]
    fn test_parse_non_numeric_rate() {
        let json = r#"{
            "Realtime Currency Exchange Rate": {
                "5. Exchange Rate": "unavailable"
            }
        }"#;

        let err = AlphaVantageProvider::parse_rate(json).unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { .. }));
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(
            AlphaVantageProvider::split_pair("USD/JPY").unwrap(),
            ("USD", "JPY")
        );
        assert!(AlphaVantageProvider::split_pair("USDJPY").is_err());
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits_without_io() {
        // No key configured: fetch must return Unconfigured before any
        // network attempt. This test passes offline for exactly that reason.
        let provider = AlphaVantageProvider::new(None, Duration::from_millis(1));

        let err = provider.fetch("USD/JPY", Unit::Rate).await.unwrap_err();
        assert!(matches!(err, MarketDataError::Unconfigured { .. }));
    }

    #[test]
    fn test_provider_id() {
        let provider = AlphaVantageProvider::new(None, Duration::from_secs(10));
        assert_eq!(provider.id(), "ALPHA_VANTAGE");
    }
}
