//! Scheduler scenarios through the public API, including config overrides.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use marketpulse_core::clock::ManualClock;
use marketpulse_core::config::MarketConfig;
use marketpulse_core::domain::SessionStatus;
use marketpulse_core::session::SessionScheduler;
use std::sync::Arc;

fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
}

fn ist_instant(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
    ist()
        .with_ymd_and_hms(y, m, d, hh, mm, ss)
        .unwrap()
        .with_timezone(&Utc)
}

fn default_scheduler_at(instant: DateTime<Utc>) -> SessionScheduler {
    SessionScheduler::with_clock(MarketConfig::default(), Arc::new(ManualClock::new(instant)))
}

#[test]
fn full_trading_day_walkthrough() {
    // Wednesday 2024-06-12: CLOSED → PRE_MARKET → OPEN → AFTER_HOURS → CLOSED.
    let cases = [
        (7, 0, 0, SessionStatus::Closed),
        (9, 0, 0, SessionStatus::PreMarket),
        (9, 14, 59, SessionStatus::PreMarket),
        (9, 15, 0, SessionStatus::Open),
        (12, 0, 0, SessionStatus::Open),
        (15, 30, 0, SessionStatus::Open),
        (15, 30, 1, SessionStatus::AfterHours),
        (16, 0, 0, SessionStatus::AfterHours),
        (16, 0, 1, SessionStatus::Closed),
        (23, 59, 59, SessionStatus::Closed),
    ];
    for (hh, mm, ss, expected) in cases {
        let scheduler = default_scheduler_at(ist_instant(2024, 6, 12, hh, mm, ss));
        let state = scheduler.session_state("NSE");
        assert_eq!(
            state.status, expected,
            "at {hh:02}:{mm:02}:{ss:02} expected {expected:?}"
        );
        assert_eq!(state.is_open, expected == SessionStatus::Open);
    }
}

#[test]
fn both_default_exchanges_agree() {
    let scheduler = default_scheduler_at(ist_instant(2024, 6, 12, 12, 0, 0));
    let nse = scheduler.session_state("NSE");
    let bse = scheduler.session_state("BSE");
    assert_eq!(nse.status, bse.status);
    assert_eq!(nse.next_close, bse.next_close);
    assert_eq!(nse.timezone, bse.timezone);
}

#[test]
fn diwali_back_to_back_holidays_roll_forward() {
    // 2024-10-31 and 2024-11-01 (Thu+Fri) are both holidays, then the
    // weekend: from Thursday the next open is Monday 2024-11-04.
    let scheduler = default_scheduler_at(ist_instant(2024, 10, 31, 10, 0, 0));
    let state = scheduler.session_state("NSE");
    assert_eq!(state.status, SessionStatus::Closed);
    assert_eq!(
        state.next_open.unwrap(),
        ist().with_ymd_and_hms(2024, 11, 4, 9, 15, 0).unwrap()
    );
}

#[test]
fn override_config_changes_hours_and_calendar() {
    let toml = r#"
        [exchanges.NSE]
        open = "10:00"
        close = "16:00"
        holidays = ["2024-06-12"]
    "#;
    let config = MarketConfig::from_toml_str(toml).unwrap();

    // The overridden calendar turns an ordinary Wednesday into a holiday.
    let scheduler = SessionScheduler::with_clock(
        config.clone(),
        Arc::new(ManualClock::new(ist_instant(2024, 6, 12, 11, 0, 0))),
    );
    let state = scheduler.session_state("NSE");
    assert_eq!(state.status, SessionStatus::Closed);
    assert_eq!(
        state.next_open.unwrap(),
        ist().with_ymd_and_hms(2024, 6, 13, 10, 0, 0).unwrap()
    );

    // And the default BSE entry is gone entirely → soft fail.
    let state = scheduler.session_state("BSE");
    assert_eq!(state.status, SessionStatus::Closed);
    assert!(state.next_open.is_none());
}

#[test]
fn session_state_serializes_for_the_wire() {
    let scheduler = default_scheduler_at(ist_instant(2024, 6, 12, 12, 0, 0));
    let state = scheduler.session_state("NSE");
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["status"], "OPEN");
    assert_eq!(json["is_open"], true);
    assert_eq!(json["exchange"], "NSE");
    assert_eq!(json["timezone"], "Asia/Kolkata");
}
