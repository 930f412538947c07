//! Composite scoring — one pass from indicators to a signed score plus the
//! ordered factor list.
//!
//! Factor strings are appended in evaluation order (RSI, trend, 52-week
//! position, volume, momentum); that order is part of the public contract.

use crate::domain::Quote;
use crate::signal::indicators::{rsi_14, sma};

/// Day-change percentage beyond which momentum counts as a signal.
const MOMENTUM_THRESHOLD_PCT: f64 = 2.0;

/// Accumulated score and its explanation, before thresholding.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub factors: Vec<String>,
    pub rsi: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub price_position: f64,
    pub volume_score: f64,
    pub momentum_score: f64,
}

/// Position of the current price inside the 52-week range, in [0, 1].
///
/// A zero or inverted range defaults to the midpoint rather than dividing
/// by zero.
pub fn price_position(current_price: f64, high_52w: f64, low_52w: f64) -> f64 {
    let range = high_52w - low_52w;
    if range > 0.0 {
        (current_price - low_52w) / range
    } else {
        0.5
    }
}

/// Tiered liquidity score: heavy (>1M), moderate (>500k), thin.
pub fn volume_score(volume: u64) -> f64 {
    if volume > 1_000_000 {
        0.7
    } else if volume > 500_000 {
        0.5
    } else {
        0.3
    }
}

/// Sign of the day's move once it crosses the ±2% threshold.
pub fn momentum_score(day_change_percent: f64) -> f64 {
    if day_change_percent > MOMENTUM_THRESHOLD_PCT {
        1.0
    } else if day_change_percent < -MOMENTUM_THRESHOLD_PCT {
        -1.0
    } else {
        0.0
    }
}

/// Run the full scoring pass over a quote and its synthetic history.
pub fn composite_score(quote: &Quote, history: &[f64]) -> ScoreBreakdown {
    let rsi = rsi_14(history);
    let sma_20 = sma(history, 20);
    let sma_50 = sma(history, 50);

    let price_position = price_position(quote.current_price, quote.high_52w, quote.low_52w);
    let volume_score = volume_score(quote.volume);
    let momentum_score = momentum_score(quote.day_change_percent);

    let mut score = 0.0;
    let mut factors = Vec::new();

    // 1. RSI band
    if rsi > 70.0 {
        score -= 0.3;
        factors.push("RSI indicates overbought conditions".to_string());
    } else if rsi < 30.0 {
        score += 0.3;
        factors.push("RSI indicates oversold conditions - potential bounce".to_string());
    } else {
        factors.push("RSI in neutral territory".to_string());
    }

    // 2. Trend agreement: price vs SMA20 and SMA20 vs SMA50. A mixed
    //    trend contributes nothing and adds no factor.
    let short_term_up = quote.current_price > sma_20;
    let long_term_up = sma_20 > sma_50;
    if short_term_up && long_term_up {
        score += 0.4;
        factors.push("Price above both short and long-term moving averages".to_string());
    } else if !short_term_up && !long_term_up {
        score -= 0.4;
        factors.push("Price below moving averages - bearish trend".to_string());
    }

    // 3. 52-week range position
    if price_position > 0.8 {
        score -= 0.2;
        factors.push("Price near 52-week high - limited upside".to_string());
    } else if price_position < 0.2 {
        score += 0.2;
        factors.push("Price near 52-week low - potential value opportunity".to_string());
    }

    // 4. Volume — always contributes and always explains itself.
    score += volume_score * 0.1;
    let interest = if volume_score > 0.6 {
        "strong"
    } else if volume_score > 0.4 {
        "moderate"
    } else {
        "weak"
    };
    factors.push(format!(
        "Volume analysis shows {interest} institutional interest"
    ));

    // 5. Momentum — only explained when non-zero.
    score += momentum_score * 0.2;
    if momentum_score > 0.0 {
        factors.push("Strong positive momentum detected".to_string());
    } else if momentum_score < 0.0 {
        factors.push("Negative momentum - caution advised".to_string());
    }

    ScoreBreakdown {
        score,
        factors,
        rsi,
        sma_20,
        sma_50,
        price_position,
        volume_score,
        momentum_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::history::synthetic_history;

    fn quote(price: f64, volume: u64, change_pct: f64, high: f64, low: f64) -> Quote {
        Quote {
            symbol: "TEST".into(),
            current_price: price,
            day_change: price * change_pct / 100.0,
            day_change_percent: change_pct,
            volume,
            high_52w: high,
            low_52w: low,
        }
    }

    #[test]
    fn price_position_midpoint_and_edges() {
        assert_eq!(price_position(1000.0, 1300.0, 700.0), 0.5);
        assert_eq!(price_position(700.0, 1300.0, 700.0), 0.0);
        assert_eq!(price_position(1300.0, 1300.0, 700.0), 1.0);
    }

    #[test]
    fn price_position_degenerate_range_defaults_to_midpoint() {
        assert_eq!(price_position(100.0, 100.0, 100.0), 0.5);
        // Inverted range is also degenerate.
        assert_eq!(price_position(100.0, 90.0, 110.0), 0.5);
    }

    #[test]
    fn volume_score_tiers() {
        assert_eq!(volume_score(1_200_000), 0.7);
        assert_eq!(volume_score(1_000_000), 0.5);
        assert_eq!(volume_score(600_000), 0.5);
        assert_eq!(volume_score(500_000), 0.3);
        assert_eq!(volume_score(0), 0.3);
    }

    #[test]
    fn momentum_score_threshold() {
        assert_eq!(momentum_score(2.5), 1.0);
        assert_eq!(momentum_score(2.0), 0.0);
        assert_eq!(momentum_score(0.0), 0.0);
        assert_eq!(momentum_score(-2.0), 0.0);
        assert_eq!(momentum_score(-2.5), -1.0);
    }

    #[test]
    fn volume_factor_is_always_present_and_momentum_only_when_nonzero() {
        let q = quote(1000.0, 1_200_000, 0.0, 1300.0, 700.0);
        let history = synthetic_history(&q.symbol, q.current_price);
        let breakdown = composite_score(&q, &history);

        assert_eq!(
            breakdown
                .factors
                .iter()
                .filter(|f| f.contains("institutional interest"))
                .count(),
            1
        );
        assert!(!breakdown.factors.iter().any(|f| f.contains("momentum")));
    }

    #[test]
    fn momentum_factor_appears_with_big_move() {
        let q = quote(1000.0, 1_200_000, 3.0, 1300.0, 700.0);
        let history = synthetic_history(&q.symbol, q.current_price);
        let breakdown = composite_score(&q, &history);
        assert!(breakdown
            .factors
            .iter()
            .any(|f| f == "Strong positive momentum detected"));
        assert_eq!(breakdown.momentum_score, 1.0);
    }

    #[test]
    fn exactly_one_rsi_factor() {
        let q = quote(1000.0, 1_200_000, 0.0, 1300.0, 700.0);
        let history = synthetic_history(&q.symbol, q.current_price);
        let breakdown = composite_score(&q, &history);
        assert_eq!(
            breakdown
                .factors
                .iter()
                .filter(|f| f.contains("RSI"))
                .count(),
            1
        );
    }

    #[test]
    fn range_position_factor_only_outside_band() {
        // Midpoint → no 52-week factor.
        let q = quote(1000.0, 1_200_000, 0.0, 1300.0, 700.0);
        let history = synthetic_history(&q.symbol, q.current_price);
        let breakdown = composite_score(&q, &history);
        assert!(!breakdown.factors.iter().any(|f| f.contains("52-week")));

        // Near the high → bearish 52-week factor.
        let q = quote(1290.0, 1_200_000, 0.0, 1300.0, 700.0);
        let history = synthetic_history(&q.symbol, q.current_price);
        let breakdown = composite_score(&q, &history);
        assert!(breakdown
            .factors
            .iter()
            .any(|f| f == "Price near 52-week high - limited upside"));
    }

    #[test]
    fn factor_order_matches_evaluation_order() {
        // Construct a quote that triggers every factor group: near the low
        // (bullish position), heavy volume, strong negative momentum.
        let q = quote(710.0, 1_200_000, -3.0, 1300.0, 700.0);
        let history = synthetic_history(&q.symbol, q.current_price);
        let breakdown = composite_score(&q, &history);

        let position = |needle: &str| {
            breakdown
                .factors
                .iter()
                .position(|f| f.contains(needle))
                .unwrap_or(usize::MAX)
        };
        let rsi_at = position("RSI");
        let range_at = position("52-week");
        let volume_at = position("institutional");
        let momentum_at = position("momentum");

        assert!(rsi_at < range_at);
        assert!(range_at < volume_at);
        assert!(volume_at < momentum_at);
    }
}
