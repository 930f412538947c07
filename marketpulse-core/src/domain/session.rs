//! Session state types.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Where the exchange sits in its daily trading cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Open,
    Closed,
    PreMarket,
    AfterHours,
}

/// Classification of the current instant for one exchange.
///
/// Recomputed fresh on every call; never cached. The transition instants
/// are exchange-local (IST for the two supported exchanges).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub is_open: bool,
    pub status: SessionStatus,
    pub exchange: String,
    pub next_open: Option<DateTime<FixedOffset>>,
    pub next_close: Option<DateTime<FixedOffset>>,
    pub timezone: String,
}

impl SessionState {
    /// Soft-fail state for an exchange the configuration does not know.
    pub fn unknown(exchange: &str, timezone: &str) -> Self {
        Self {
            is_open: false,
            status: SessionStatus::Closed,
            exchange: exchange.to_string(),
            next_open: None,
            next_close: None,
            timezone: timezone.to_string(),
        }
    }
}
