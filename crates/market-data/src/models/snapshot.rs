use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::indicator::Indicator;
use super::observation::Observation;

/// Immutable result of one resolution cycle.
///
/// An indicator slot is either a complete [`Observation`] or absent from the
/// map entirely - never a partially populated entry and never a placeholder
/// numeric. A new resolution produces a new `Snapshot`; nothing mutates one
/// after construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Resolved observations, keyed by indicator. Absent key = unavailable.
    pub indicators: BTreeMap<Indicator, Observation>,

    /// When this snapshot was assembled
    pub resolved_at: DateTime<Utc>,

    /// True if any indicator came from the static fallback (or could not be
    /// resolved at all) rather than a live provider
    pub degraded: bool,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time.
    pub fn new(indicators: BTreeMap<Indicator, Observation>, degraded: bool) -> Self {
        Self {
            indicators,
            resolved_at: Utc::now(),
            degraded,
        }
    }

    /// The observation for an indicator, if it resolved.
    pub fn observation(&self, indicator: Indicator) -> Option<&Observation> {
        self.indicators.get(&indicator)
    }

    /// True when every indicator resolved to a value.
    pub fn is_complete(&self) -> bool {
        Indicator::ALL
            .iter()
            .all(|i| self.indicators.contains_key(i))
    }
}
