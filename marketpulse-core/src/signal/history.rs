//! Deterministic synthetic price history.
//!
//! A symbol's history is fully determined by (symbol, current_price): the
//! symbol is hashed into an integer seed, and a sine-based noise function
//! turns `seed + day_index` into a daily variation in [-2%, +2%], plus a
//! small sinusoidal long-term drift. No RNG facility is involved, so the
//! sequence is bit-for-bit reproducible across processes and ports that
//! share the same formula.

use std::f64::consts::TAU;

/// Number of synthetic daily closes generated per symbol.
pub const HISTORY_POINTS: usize = 50;

/// 32-bit string hash of the symbol (absolute value).
///
/// `h = h*31 + unit` over UTF-16 code units with wrapping i32 arithmetic,
/// matching the widely used `s[0]*31^(n-1) + ... + s[n-1]` scheme.
pub fn symbol_seed(symbol: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in symbol.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// Sine-based pseudo-random value in [0, 1) for an integer-valued input.
///
/// Repeatable, not cryptographic. Only the fractional part of
/// `sin(n) * 10000` is kept.
pub fn noise(n: f64) -> f64 {
    let x = n.sin() * 10_000.0;
    x - x.floor()
}

/// Generate `HISTORY_POINTS` synthetic daily closes, oldest first.
///
/// Each step multiplies the running price by `1 + variation + drift` where
/// variation is `noise(seed + i)` rescaled to [-2%, +2%] and drift is one
/// full sine cycle across the series scaled to ±0.1%.
pub fn synthetic_history(symbol: &str, current_price: f64) -> Vec<f64> {
    let seed = f64::from(symbol_seed(symbol));
    let mut prices = Vec::with_capacity(HISTORY_POINTS);
    let mut price = current_price;

    for i in 0..HISTORY_POINTS {
        let day_variation = noise(seed + i as f64) * 0.04 - 0.02;
        let drift = (i as f64 / HISTORY_POINTS as f64 * TAU).sin() * 0.001;
        price *= 1.0 + day_variation + drift;
        prices.push(price);
    }

    prices
}
