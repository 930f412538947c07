//! Market session scheduler.
//!
//! Pure function of the injected clock, an exchange id, and the static
//! holiday calendar. Classifies the current instant into
//! OPEN / CLOSED / PRE_MARKET / AFTER_HOURS and derives countdown labels.
//!
//! Boundary policy (one canonical choice, both endpoints documented here):
//! - `[open, close]` → OPEN, inclusive on both ends
//! - `[open - 15min, open)` → PRE_MARKET
//! - `(close, close + 30min]` → AFTER_HOURS
//! - anything else → CLOSED; before the pre-market window on a trading day
//!   the next open is *today's* open, otherwise the next trading day's

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Weekday};
use std::sync::Arc;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::{ExchangeSpec, MarketConfig, DEFAULT_TIMEZONE};
use crate::domain::{SessionState, SessionStatus};

/// Pre-market window opens this many minutes before the session open.
const PRE_MARKET_LEAD_MIN: i64 = 15;

/// After-hours window extends this many minutes past the session close.
const AFTER_HOURS_TAIL_MIN: i64 = 30;

/// IST is UTC+05:30 year-round (no DST).
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Sentinel countdown label when there is no relevant transition instant.
pub const MARKET_CLOSED_LABEL: &str = "Market closed";

/// Sentinel countdown label for an inconsistent open countdown (the open
/// instant is already in the past).
pub const SHOULD_BE_OPEN_LABEL: &str = "Market should be open";

fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap()
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn local_instant(date: NaiveDate, time: NaiveTime) -> DateTime<FixedOffset> {
    // Fixed offsets map every local datetime to exactly one instant.
    date.and_time(time).and_local_timezone(ist()).unwrap()
}

/// Classifies instants into session states for the configured exchanges.
pub struct SessionScheduler {
    config: MarketConfig,
    clock: Arc<dyn Clock>,
}

impl SessionScheduler {
    pub fn new(config: MarketConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: MarketConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Classify "now" for `exchange`.
    ///
    /// Unknown exchanges soft-fail to a CLOSED state with no transition
    /// instants rather than returning an error.
    pub fn session_state(&self, exchange: &str) -> SessionState {
        let Some(spec) = self.config.exchange(exchange) else {
            debug!(exchange, "unknown exchange, returning closed state");
            return SessionState::unknown(exchange, DEFAULT_TIMEZONE);
        };

        let now_local = self.clock.now().with_timezone(&ist());
        let today = now_local.date_naive();

        if is_weekend(today) || spec.is_holiday(today) {
            let next_open = self.next_trading_day_open(spec, today);
            debug!(exchange, %next_open, "non-trading day");
            return SessionState {
                is_open: false,
                status: SessionStatus::Closed,
                exchange: exchange.to_string(),
                next_open: Some(next_open),
                next_close: None,
                timezone: spec.timezone.clone(),
            };
        }

        let time = now_local.time();
        let pre_market_start = spec.open - Duration::minutes(PRE_MARKET_LEAD_MIN);
        let after_hours_end = spec.close + Duration::minutes(AFTER_HOURS_TAIL_MIN);

        let (is_open, status, next_open, next_close) = if time >= spec.open && time <= spec.close {
            (
                true,
                SessionStatus::Open,
                None,
                Some(local_instant(today, spec.close)),
            )
        } else if time >= pre_market_start && time < spec.open {
            (
                false,
                SessionStatus::PreMarket,
                Some(local_instant(today, spec.open)),
                Some(local_instant(today, spec.close)),
            )
        } else if time > spec.close && time <= after_hours_end {
            (
                false,
                SessionStatus::AfterHours,
                Some(self.next_trading_day_open(spec, today)),
                None,
            )
        } else if time < pre_market_start {
            // Early morning of a trading day: today's open is still ahead.
            (
                false,
                SessionStatus::Closed,
                Some(local_instant(today, spec.open)),
                None,
            )
        } else {
            (
                false,
                SessionStatus::Closed,
                Some(self.next_trading_day_open(spec, today)),
                None,
            )
        };

        debug!(exchange, ?status, "session classified");
        SessionState {
            is_open,
            status,
            exchange: exchange.to_string(),
            next_open,
            next_close,
            timezone: spec.timezone.clone(),
        }
    }

    /// Countdown until the next open, or a sentinel label.
    pub fn time_until_open(&self, exchange: &str) -> String {
        let state = self.session_state(exchange);
        let Some(next_open) = state.next_open else {
            return MARKET_CLOSED_LABEL.to_string();
        };

        let remaining = next_open.signed_duration_since(self.clock.now());
        if remaining <= Duration::zero() {
            return SHOULD_BE_OPEN_LABEL.to_string();
        }
        format_countdown(remaining)
    }

    /// Countdown until today's close, or a sentinel label when the session
    /// is not open.
    pub fn time_until_close(&self, exchange: &str) -> String {
        let state = self.session_state(exchange);
        let next_close = match state.next_close {
            Some(close) if state.is_open => close,
            _ => return MARKET_CLOSED_LABEL.to_string(),
        };

        let remaining = next_close.signed_duration_since(self.clock.now());
        if remaining <= Duration::zero() {
            return MARKET_CLOSED_LABEL.to_string();
        }
        let hours = remaining.num_hours();
        let minutes = remaining.num_minutes() % 60;
        format!("{hours}h {minutes}m")
    }

    /// Open instant of the first trading day strictly after `from`.
    ///
    /// Walks forward one day at a time so consecutive holiday + weekend
    /// collisions are skipped (a Friday holiday rolls past the weekend).
    fn next_trading_day_open(&self, spec: &ExchangeSpec, from: NaiveDate) -> DateTime<FixedOffset> {
        let mut day = from + Duration::days(1);
        while is_weekend(day) || spec.is_holiday(day) {
            day += Duration::days(1);
        }
        local_instant(day, spec.open)
    }
}

/// Format a positive duration as "{h}h {m}m", with a day component once
/// the total crosses 24 hours.
fn format_countdown(remaining: Duration) -> String {
    let total_minutes = remaining.num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 24 {
        format!("{}d {}h {}m", hours / 24, hours % 24, minutes)
    } else {
        format!("{hours}h {minutes}m")
    }
}
