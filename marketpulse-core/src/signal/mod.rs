//! Signal engine — synthetic history, indicators, composite scoring,
//! and the TTL-bounded prediction cache.

pub mod cache;
pub mod engine;
pub mod history;
pub mod indicators;
pub mod score;

pub use cache::PredictionCache;
pub use engine::{PredictError, SignalEngine};
