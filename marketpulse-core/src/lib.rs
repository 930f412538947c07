//! MarketPulse Core — session scheduling and signal scoring engines.
//!
//! This crate contains the two deterministic engines behind the demo:
//! - Domain types (quotes, predictions, session states)
//! - Market session scheduler with weekend/holiday rollover
//! - Signal engine: synthetic history, RSI/SMA indicators, composite
//!   scoring, and a TTL-bounded prediction cache
//! - Injectable clock so both engines are testable at fixed instants

pub mod clock;
pub mod config;
pub mod domain;
pub mod session;
pub mod signal;
