//! Yahoo Finance chart provider implementation.
//!
//! Fetches the latest price for a ticker from the anonymous v8 chart
//! endpoint. Used as the secondary source for every indicator: `^N225` for
//! the index, `JPY=X` for the exchange rate, and the `^JGBL` futures proxy
//! for the bond yield, which Yahoo does not quote directly.
//!
//! The value comes from `meta.regularMarketPrice` when present, otherwise
//! from the last non-null entry of the daily close column.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use num_traits::FromPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{Observation, Unit};
use crate::provider::QuoteProvider;

use models::ChartResponse;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Stable id of this provider, as referenced by the registry.
pub const PROVIDER_ID: &str = "YAHOO";

/// Yahoo Finance chart provider. No credential required.
pub struct YahooProvider {
    client: Client,
}

impl YahooProvider {
    /// Create a new Yahoo chart provider.
    pub fn new(timeout: Duration) -> Self {
        // Yahoo rejects requests without a browser-ish user agent.
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; maru-site)")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Make a request for the recent daily chart of a symbol.
    async fn fetch_chart_text(&self, symbol: &str) -> Result<String, MarketDataError> {
        let base = format!("{}/{}", BASE_URL, encode(symbol));
        let url = reqwest::Url::parse_with_params(&base, [("interval", "1d"), ("range", "5d")])
            .map_err(|e| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            })?;

        debug!("Yahoo request: {}", url.as_str());

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

    /// Parse the latest price out of a chart response body.
    fn parse_latest(text: &str) -> Result<(Decimal, Option<DateTime<Utc>>), MarketDataError> {
        let response: ChartResponse =
            serde_json::from_str(text).map_err(|e| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })?;

        if let Some(error) = response.chart.error {
            return Err(MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("{}: {}", error.code, error.description),
            });
        }

        let result = response
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: "empty chart result".to_string(),
            })?;

        // Preferred: the meta price, which reflects the latest session.
        if let Some(price) = result.meta.regular_market_price {
            let value = Self::lift_price(price)?;
            let observed_at = result.meta.regular_market_time.and_then(Self::parse_epoch);
            return Ok((value, observed_at));
        }

        // Fallback: last non-null entry of the close column.
        let closes = result
            .indicators
            .as_ref()
            .and_then(|i| i.quote.first())
            .and_then(|q| q.close.as_ref())
            .ok_or_else(|| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: "no close column in chart result".to_string(),
            })?;

        let (index, close) = closes
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, c)| c.map(|v| (i, v)))
            .ok_or_else(|| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: "close column has no non-null entries".to_string(),
            })?;

        let observed_at = result
            .timestamp
            .as_ref()
            .and_then(|ts| ts.get(index).copied())
            .and_then(Self::parse_epoch);

        Ok((Self::lift_price(close)?, observed_at))
    }

    /// Lift a JSON float into a Decimal.
    fn lift_price(price: f64) -> Result<Decimal, MarketDataError> {
        Decimal::from_f64(price).ok_or_else(|| MarketDataError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: format!("price is not representable: {}", price),
        })
    }

    /// Parse a unix epoch seconds value to DateTime<Utc>.
    fn parse_epoch(epoch: i64) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(epoch, 0).single()
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, code: &str, unit: Unit) -> Result<Observation, MarketDataError> {
        let text = self.fetch_chart_text(code).await?;
        let (value, observed_at) = Self::parse_latest(&text)?;

        debug!("Yahoo: latest {} = {}", code, value);

        Ok(match observed_at {
            Some(at) => Observation::observed(value, unit, PROVIDER_ID, at),
            None => Observation::new(value, unit, PROVIDER_ID),
        })
    }
}
