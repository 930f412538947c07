//! Prediction output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed horizon label attached to every prediction.
pub const TIME_HORIZON: &str = "1-3 months";

/// Terminal trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Coarse risk bucket derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One trading recommendation for one symbol.
///
/// Immutable once created. `factors` lists the human-readable explanation
/// strings in the exact order the scoring pass evaluated them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub symbol: String,
    pub signal: Signal,
    /// Integer percentage in [50, 95].
    pub confidence: u8,
    pub target_price: f64,
    pub stop_loss: f64,
    pub risk_level: RiskLevel,
    pub time_horizon: String,
    pub factors: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub reasoning: String,
}
