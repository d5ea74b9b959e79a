use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::ProviderId;

/// Unit of a quoted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Index points (e.g. Nikkei 225 level)
    Level,

    /// Currency units per base unit (e.g. JPY per USD)
    Rate,

    /// Percentage (e.g. a bond yield)
    Percent,
}

impl Unit {
    /// Suffix appended by the display layer.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Level | Self::Rate => "",
            Self::Percent => "%",
        }
    }
}

/// One resolved numeric observation.
///
/// Immutable once produced: every field is populated at construction and a
/// present observation never carries placeholder values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Observation {
    /// Quoted value
    pub value: Decimal,

    /// Unit the candidate quoted in
    pub unit: Unit,

    /// Source of the value (FRED, ALPHA_VANTAGE, YAHOO, STATIC)
    pub source: ProviderId,

    /// Upstream timestamp, when the provider reported one.
    /// `None` for the static fallback, which has no freshness guarantee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl Observation {
    /// Create an observation without an upstream timestamp.
    pub fn new(value: Decimal, unit: Unit, source: impl Into<ProviderId>) -> Self {
        Self {
            value,
            unit,
            source: source.into(),
            observed_at: None,
        }
    }

    /// Create an observation carrying the provider's own timestamp.
    pub fn observed(
        value: Decimal,
        unit: Unit,
        source: impl Into<ProviderId>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            value,
            unit,
            source: source.into(),
            observed_at: Some(observed_at),
        }
    }
}
