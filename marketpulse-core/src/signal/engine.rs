//! Signal engine — quote in, cached trading recommendation out.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::domain::{PredictionResult, Quote, RiskLevel, Signal, TIME_HORIZON};
use crate::signal::cache::PredictionCache;
use crate::signal::history::synthetic_history;
use crate::signal::score::{composite_score, ScoreBreakdown};

/// Cache TTL: a symbol's prediction is reused for this long.
const CACHE_TTL_MINUTES: i64 = 5;

/// Composite score beyond which the engine commits to BUY (mirrored for
/// SELL). Exactly ±0.3 stays HOLD.
const SIGNAL_THRESHOLD: f64 = 0.3;

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("invalid quote for {symbol:?}: {reason}")]
    InvalidQuote { symbol: String, reason: String },
}

/// Deterministic one-shot classifier with a per-symbol result cache.
///
/// `predict` takes `&self`; the cache handles its own synchronization, so
/// a single engine can be shared process-wide.
pub struct SignalEngine {
    clock: Arc<dyn Clock>,
    cache: PredictionCache,
}

impl SignalEngine {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_clock_and_ttl(clock, Duration::minutes(CACHE_TTL_MINUTES))
    }

    pub fn with_clock_and_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            cache: PredictionCache::new(ttl),
        }
    }

    /// Derive a recommendation for the quote, reusing a live cache entry.
    ///
    /// The cache key is the symbol alone: a changed price for the same
    /// symbol inside the TTL window returns the earlier result unchanged.
    pub fn predict(&self, quote: &Quote) -> Result<PredictionResult, PredictError> {
        validate(quote)?;

        let now = self.clock.now();
        if let Some(cached) = self.cache.get(&quote.symbol, now) {
            debug!(symbol = %quote.symbol, "prediction cache hit");
            return Ok(cached);
        }
        debug!(symbol = %quote.symbol, "prediction cache miss");

        let prediction = self.analyze(quote);
        self.cache.insert(prediction.clone(), now);
        Ok(prediction)
    }

    /// Drop all cached predictions; the next call per symbol recomputes.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn analyze(&self, quote: &Quote) -> PredictionResult {
        let history = synthetic_history(&quote.symbol, quote.current_price);
        let breakdown = composite_score(quote, &history);
        classify(quote, breakdown, self.clock.now())
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(quote: &Quote) -> Result<(), PredictError> {
    if !quote.is_sane() {
        let reason = if quote.symbol.trim().is_empty() {
            "symbol must not be empty"
        } else {
            "current price must be positive and finite"
        };
        return Err(PredictError::InvalidQuote {
            symbol: quote.symbol.clone(),
            reason: reason.to_string(),
        });
    }
    Ok(())
}

/// Threshold the composite score and derive the per-signal fields.
fn classify(quote: &Quote, breakdown: ScoreBreakdown, timestamp: DateTime<Utc>) -> PredictionResult {
    let price = quote.current_price;
    let score = breakdown.score;

    let (signal, confidence, target_price, stop_loss, risk_level, reasoning) =
        if score > SIGNAL_THRESHOLD {
            (
                Signal::Buy,
                (70.0 + score * 50.0).clamp(60.0, 95.0),
                price * (1.05 + (score * 0.1).max(0.0)),
                price * 0.95,
                if score > 0.6 {
                    RiskLevel::Low
                } else {
                    RiskLevel::Medium
                },
                "Technical indicators suggest bullish momentum with favorable risk-reward ratio",
            )
        } else if score < -SIGNAL_THRESHOLD {
            (
                Signal::Sell,
                (70.0 + score.abs() * 50.0).clamp(60.0, 95.0),
                price * (0.95 + score * 0.1),
                price * 1.05,
                if score < -0.6 {
                    RiskLevel::Low
                } else {
                    RiskLevel::Medium
                },
                "Technical analysis indicates bearish pressure with downside risk",
            )
        } else {
            (
                Signal::Hold,
                (60.0 + score.abs() * 20.0).max(50.0),
                price * (1.02 + score * 0.05),
                price * 0.98,
                RiskLevel::Medium,
                "Mixed signals suggest sideways movement - wait for clearer direction",
            )
        };

    // Unconditional post-processing: confidence is an integer percentage in
    // [50, 95]; the target never drops below 0.8x price; the stop is forced
    // onto the loss side of the current price whatever the raw formula said.
    let confidence = confidence.clamp(50.0, 95.0).round() as u8;
    let target_price = target_price.max(price * 0.8);
    let stop_loss = match signal {
        Signal::Buy => stop_loss.min(price * 0.98),
        Signal::Sell | Signal::Hold => stop_loss.max(price * 1.02),
    };

    PredictionResult {
        symbol: quote.symbol.clone(),
        signal,
        confidence,
        target_price: round2(target_price),
        stop_loss: round2(stop_loss),
        risk_level,
        time_horizon: TIME_HORIZON.to_string(),
        factors: breakdown.factors,
        timestamp,
        reasoning: reasoning.to_string(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
