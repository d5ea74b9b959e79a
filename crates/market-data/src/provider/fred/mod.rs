//! FRED (Federal Reserve Economic Data) provider implementation.
//!
//! Fetches the most recent observation of a FRED series via the
//! `series/observations` endpoint, sorted descending and limited to one row.
//! Used for the Nikkei 225 level (`NIKKEI225`) and the Japan 10-year
//! government bond yield (`IRLTLT01JPM156N`).
//!
//! An API key is optional: anonymous calls work under a stricter quota, so
//! the candidate is attempted either way and the key, when present, rides in
//! the query string.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{Observation, Unit};
use crate::provider::QuoteProvider;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// Stable id of this provider, as referenced by the registry.
pub const PROVIDER_ID: &str = "FRED";

/// FRED market data provider.
///
/// Statistical-archive source: values are daily/monthly series rows rather
/// than realtime ticks, which is accurate enough for a display snapshot.
pub struct FredProvider {
    client: Client,
    api_key: Option<String>,
}

// ============================================================================
// Response structures for the FRED API
// ============================================================================

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Option<Vec<SeriesObservation>>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeriesObservation {
    date: String,
    value: String,
}

// ============================================================================
// FredProvider implementation
// ============================================================================

impl FredProvider {
    /// Create a new FRED provider.
    ///
    /// `api_key` is optional; without one, requests go out anonymously.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a request for the latest row of a series.
    async fn fetch_latest_text(&self, series_id: &str) -> Result<String, MarketDataError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("series_id", series_id),
            ("file_type", "json"),
            ("sort_order", "desc"),
            ("limit", "1"),
        ];
        if let Some(ref key) = self.api_key {
            params.push(("api_key", key));
        }

        let url = reqwest::Url::parse_with_params(BASE_URL, &params).map_err(|e| {
            MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })?;

        let logged_url = match self.api_key {
            Some(ref key) => url.as_str().replace(key, "***"),
            None => url.as_str().to_string(),
        };
        debug!("FRED request: {}", logged_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketDataError::from_reqwest(PROVIDER_ID, e))?;

        let status = response.status();
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

    /// Parse the newest observation out of a response body.
    ///
    /// FRED encodes a missing datum as the literal value `"."`; that is a
    /// parse failure here, never a zero.
    fn parse_latest(text: &str) -> Result<(Decimal, Option<DateTime<Utc>>), MarketDataError> {
        let response: ObservationsResponse =
            serde_json::from_str(text).map_err(|e| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })?;

        if let Some(message) = response.error_message {
            return Err(MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message,
            });
        }

        let row = response
            .observations
            .and_then(|mut rows| {
                if rows.is_empty() {
                    None
                } else {
                    Some(rows.remove(0))
                }
            })
            .ok_or_else(|| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: "no observations in response".to_string(),
            })?;

        let value = Decimal::from_str(&row.value).map_err(|_| MarketDataError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: format!("non-numeric observation value: {:?}", row.value),
        })?;

        Ok((value, Self::parse_date(&row.date)))
    }

    /// Parse a date string in YYYY-MM-DD format to DateTime<Utc>.
    fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(|dt| Utc.from_local_datetime(&dt).single())
    }
}

#[async_trait]
impl QuoteProvider for FredProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, code: &str, unit: Unit) -> Result<Observation, MarketDataError> {
        let text = self.fetch_latest_text(code).await?;
        let (value, observed_at) = Self::parse_latest(&text)?;

        debug!("FRED: latest {} = {}", code, value);

        Ok(match observed_at {
            Some(at) => Observation::observed(value, unit, PROVIDER_ID, at),
            None => Observation::new(value, unit, PROVIDER_ID),
        })
    }
}
