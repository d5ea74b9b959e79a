use serde::{Deserialize, Serialize};

use super::observation::Unit;

/// Logical market indicator tracked by the site.
///
/// Each indicator maps, via the registry, to an ordered list of provider
/// candidates. The enum is `Ord` so snapshot maps iterate in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Nikkei 225 index level
    EquityIndex,

    /// USD/JPY exchange rate
    FxRate,

    /// Japan 10-year government bond yield
    BondYield,
}

impl Indicator {
    /// All indicators, in display order. One resolution cycle covers all of them.
    pub const ALL: [Indicator; 3] = [Self::EquityIndex, Self::FxRate, Self::BondYield];

    /// Stable key used in the static fallback file and serialized snapshots.
    pub fn key(&self) -> &'static str {
        match self {
            Self::EquityIndex => "equity_index",
            Self::FxRate => "fx_rate",
            Self::BondYield => "bond_yield",
        }
    }

    /// Human-readable label for the display layer.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EquityIndex => "Nikkei 225",
            Self::FxRate => "USD/JPY",
            Self::BondYield => "Japan 10Y Yield",
        }
    }

    /// Canonical display unit. Individual candidates may quote in a
    /// different unit (e.g. a futures-price proxy for the yield).
    pub fn unit(&self) -> Unit {
        match self {
            Self::EquityIndex => Unit::Level,
            Self::FxRate => Unit::Rate,
            Self::BondYield => Unit::Percent,
        }
    }
}
