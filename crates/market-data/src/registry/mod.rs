//! Candidate registry: which providers can satisfy which indicator, in
//! which order.
//!
//! The lists are static, hand-curated configuration. Ordering encodes
//! preference - the most authoritative or least rate-limited source first -
//! and the resolver walks it top to bottom. There is no runtime mutation
//! and no failure mode: `candidates` is total over the indicator enum.

use crate::models::{Indicator, Unit};
use crate::provider::{alpha_vantage, fred, yahoo};

/// One way to satisfy an indicator: a provider plus the instrument code it
/// understands and the unit it quotes in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Provider id (see the `provider` modules' `PROVIDER_ID` constants)
    pub provider: &'static str,

    /// Provider-scoped instrument identifier. Opaque outside the provider:
    /// a FRED series id, a currency pair, a Yahoo ticker.
    pub code: &'static str,

    /// Unit this candidate quotes in. May differ from the indicator's
    /// canonical unit (the JGB futures proxy quotes a price level, not a
    /// yield percentage).
    pub unit: Unit,
}

const EQUITY_INDEX: &[Candidate] = &[
    Candidate {
        provider: fred::PROVIDER_ID,
        code: "NIKKEI225",
        unit: Unit::Level,
    },
    Candidate {
        provider: yahoo::PROVIDER_ID,
        code: "^N225",
        unit: Unit::Level,
    },
];

const FX_RATE: &[Candidate] = &[
    Candidate {
        provider: alpha_vantage::PROVIDER_ID,
        code: "USD/JPY",
        unit: Unit::Rate,
    },
    Candidate {
        provider: yahoo::PROVIDER_ID,
        code: "JPY=X",
        unit: Unit::Rate,
    },
];

const BOND_YIELD: &[Candidate] = &[
    Candidate {
        provider: fred::PROVIDER_ID,
        code: "IRLTLT01JPM156N",
        unit: Unit::Percent,
    },
    // The 10Y JGB yield is not directly quotable on Yahoo; the futures
    // contract stands in as a reference value.
    Candidate {
        provider: yahoo::PROVIDER_ID,
        code: "^JGBL",
        unit: Unit::Level,
    },
];

/// The ordered candidate list for an indicator.
pub fn candidates(indicator: Indicator) -> &'static [Candidate] {
    match indicator {
        Indicator::EquityIndex => EQUITY_INDEX,
        Indicator::FxRate => FX_RATE,
        Indicator::BondYield => BOND_YIELD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_indicator_has_candidates() {
        for indicator in Indicator::ALL {
            assert!(!candidates(indicator).is_empty());
        }
    }

    #[test]
    fn test_primary_sources() {
        assert_eq!(candidates(Indicator::EquityIndex)[0].provider, "FRED");
        assert_eq!(candidates(Indicator::FxRate)[0].provider, "ALPHA_VANTAGE");
        assert_eq!(candidates(Indicator::BondYield)[0].provider, "FRED");
    }

    #[test]
    fn test_yahoo_is_the_universal_secondary() {
        for indicator in Indicator::ALL {
            let list = candidates(indicator);
            assert_eq!(list.last().unwrap().provider, "YAHOO");
        }
    }

    #[test]
    fn test_yield_proxy_quotes_a_level() {
        let proxy = candidates(Indicator::BondYield).last().unwrap();
        assert_eq!(proxy.code, "^JGBL");
        assert_eq!(proxy.unit, Unit::Level);
    }
}
