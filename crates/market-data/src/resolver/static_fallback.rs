//! Static last-known-good values, read from a local JSON file.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::warn;
use rust_decimal::Decimal;

use crate::models::Indicator;

/// Source tag for observations served from the static fallback file.
pub const STATIC_SOURCE: &str = "STATIC";

/// Read-only access to the static fallback record.
///
/// The file is a flat map of indicator key to last-known value:
///
/// ```json
/// { "equity_index": 39500.0, "fx_rate": 148.2, "bond_yield": 1.05 }
/// ```
///
/// It is maintained by hand and replaced out-of-band; this subsystem never
/// writes it. The file is opened on each full-fallback event rather than
/// cached at startup, so a replaced file takes effect without a restart.
pub struct StaticFallback {
    path: PathBuf,
}

impl StaticFallback {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The last-known value for an indicator, if the file has one.
    ///
    /// An unreadable or malformed file is logged and treated as "no value";
    /// the resolver then reports the indicator as absent.
    pub fn lookup(&self, indicator: Indicator) -> Option<Decimal> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "static fallback file {} unreadable: {}",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        let values: HashMap<String, Decimal> = match serde_json::from_str(&text) {
            Ok(values) => values,
            Err(e) => {
                warn!(
                    "static fallback file {} malformed: {}",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        values.get(indicator.key()).copied()
    }
}
