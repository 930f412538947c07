//! Domain types shared by the engines and their callers.

pub mod prediction;
pub mod quote;
pub mod session;

pub use prediction::{PredictionResult, RiskLevel, Signal, TIME_HORIZON};
pub use quote::Quote;
pub use session::{SessionState, SessionStatus};
