//! Technical indicators over a close-price series.
//!
//! These operate on the synthetic history, which is always well-formed
//! (fixed length, positive, no NaN), so the implementations are the simple
//! single-value variants rather than full rolling series.

/// RSI window: the first 14 transitions of the series.
pub const RSI_PERIOD: usize = 14;

/// Relative Strength Index over the first `RSI_PERIOD` transitions.
///
/// Returns neutral 50 when fewer than 14 points exist. A zero average loss
/// is treated as 1 to avoid division by zero, so an all-gains window maps
/// to a high-but-finite RSI instead of exactly 100.
pub fn rsi_14(prices: &[f64]) -> f64 {
    if prices.len() < RSI_PERIOD {
        return 50.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..prices.len().min(RSI_PERIOD + 1) {
        let change = prices[i] - prices[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses += change.abs();
        }
    }

    let avg_gain = gains / RSI_PERIOD as f64;
    let avg_loss = losses / RSI_PERIOD as f64;
    let rs = avg_gain / if avg_loss == 0.0 { 1.0 } else { avg_loss };
    100.0 - 100.0 / (1.0 + rs)
}

/// Simple moving average of the trailing `period` prices.
///
/// Falls back to the last available price when the series is shorter than
/// the window (0.0 for an empty series).
pub fn sma(prices: &[f64], period: usize) -> f64 {
    assert!(period >= 1, "SMA period must be >= 1");
    if prices.len() < period {
        return prices.last().copied().unwrap_or(0.0);
    }
    prices[prices.len() - period..].iter().sum::<f64>() / period as f64
}
