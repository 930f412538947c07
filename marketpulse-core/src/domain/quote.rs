//! Quote — the externally supplied market snapshot for one symbol.

use serde::{Deserialize, Serialize};

/// Current market snapshot for a single symbol.
///
/// Supplied by the caller (quote fetchers live outside this crate). In
/// well-formed data `low_52w <= current_price <= high_52w`, but only
/// `current_price > 0` is hard-required; a degenerate 52-week range is
/// tolerated and defaulted downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub current_price: f64,
    pub day_change: f64,
    pub day_change_percent: f64,
    pub volume: u64,
    pub high_52w: f64,
    pub low_52w: f64,
}

impl Quote {
    /// Basic sanity check: non-empty symbol and a positive, finite price.
    pub fn is_sane(&self) -> bool {
        !self.symbol.trim().is_empty()
            && self.current_price.is_finite()
            && self.current_price > 0.0
    }
}
