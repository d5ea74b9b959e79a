use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use maru_market_data::{Indicator, Snapshot};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::main_lib::AppState;

/// Snapshot of the three indicators for the display layer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotResponse {
    resolved_at: DateTime<Utc>,
    degraded: bool,
    indicators: Vec<IndicatorDto>,
}

/// One indicator row. `value` is null when the indicator could not be
/// resolved at all; rendering a sentinel like "--" is the client's job.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndicatorDto {
    key: &'static str,
    label: &'static str,
    value: Option<Decimal>,
    suffix: &'static str,
    source: Option<String>,
    observed_at: Option<DateTime<Utc>>,
}

impl SnapshotResponse {
    fn from_snapshot(snapshot: &Snapshot) -> Self {
        let indicators = Indicator::ALL
            .iter()
            .map(|&indicator| {
                let observation = snapshot.observation(indicator);
                IndicatorDto {
                    key: indicator.key(),
                    label: indicator.label(),
                    value: observation.map(|o| o.value),
                    suffix: observation
                        .map(|o| o.unit.suffix())
                        .unwrap_or_else(|| indicator.unit().suffix()),
                    source: observation.map(|o| o.source.to_string()),
                    observed_at: observation.and_then(|o| o.observed_at),
                }
            })
            .collect();

        Self {
            resolved_at: snapshot.resolved_at,
            degraded: snapshot.degraded,
            indicators,
        }
    }
}

/// Get the current market snapshot (cached or freshly resolved).
async fn get_market_snapshot(State(state): State<Arc<AppState>>) -> Json<SnapshotResponse> {
    let snapshot = state.snapshot_service.get_snapshot().await;
    Json(SnapshotResponse::from_snapshot(&snapshot))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/market/snapshot", get(get_market_snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maru_market_data::{Observation, Unit};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    #[test]
    fn test_dto_maps_present_and_absent_slots() {
        let mut indicators = BTreeMap::new();
        indicators.insert(
            Indicator::FxRate,
            Observation::new(dec!(148.2), Unit::Rate, "STATIC"),
        );
        let snapshot = Snapshot::new(indicators, true);

        let dto = SnapshotResponse::from_snapshot(&snapshot);

        assert!(dto.degraded);
        assert_eq!(dto.indicators.len(), 3);

        let fx = dto.indicators.iter().find(|i| i.key == "fx_rate").unwrap();
        assert_eq!(fx.value, Some(dec!(148.2)));
        assert_eq!(fx.source.as_deref(), Some("STATIC"));

        let equity = dto
            .indicators
            .iter()
            .find(|i| i.key == "equity_index")
            .unwrap();
        assert_eq!(equity.value, None);
        assert_eq!(equity.source, None);
    }

    #[test]
    fn test_yield_row_carries_percent_suffix() {
        let mut indicators = BTreeMap::new();
        indicators.insert(
            Indicator::BondYield,
            Observation::new(dec!(1.05), Unit::Percent, "FRED"),
        );
        let snapshot = Snapshot::new(indicators, false);

        let dto = SnapshotResponse::from_snapshot(&snapshot);
        let yield_row = dto
            .indicators
            .iter()
            .find(|i| i.key == "bond_yield")
            .unwrap();
        assert_eq!(yield_row.suffix, "%");

        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"resolvedAt\""));
        assert!(json.contains("\"value\":null"));
    }
}
