//! Yahoo Finance chart API response models.
//!
//! Covers only the fields this crate reads: the meta price plus the daily
//! close column it falls back to. The API returns many more.

use serde::Deserialize;

/// Main response wrapper for the chart API
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

/// Chart container: one of `result` / `error` is populated
#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// Application-level error body
#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

/// Individual result from the chart API
#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Option<ChartIndicators>,
}

/// Metadata block carrying the regular market price
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub currency: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_time: Option<i64>,
}

/// Indicator container
#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    pub quote: Vec<QuoteBlock>,
}

/// Tabular OHLC columns; entries are null on non-trading gaps
#[derive(Debug, Deserialize)]
pub struct QuoteBlock {
    pub close: Option<Vec<Option<f64>>>,
}
