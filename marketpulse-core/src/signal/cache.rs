//! TTL-bounded prediction cache.
//!
//! Keyed by symbol alone — deliberately not by the full quote, so a changed
//! price for the same symbol inside the TTL window returns the stale entry.
//! That staleness is documented engine behavior and covered by tests.
//!
//! Entries are never swept in the background: expiry is checked on read,
//! and stale entries are overwritten on the next miss.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::PredictionResult;

#[derive(Debug, Clone)]
struct CacheEntry {
    prediction: PredictionResult,
    inserted_at: DateTime<Utc>,
}

/// Symbol-keyed cache with expiry-on-read semantics.
///
/// The map sits behind a mutex so the owning engine can serve `&self`
/// callers from multiple threads; lock hold times are a map lookup.
#[derive(Debug)]
pub struct PredictionCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl PredictionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the live entry for `symbol`, if any.
    ///
    /// An entry whose age has reached the TTL is treated as absent (it is
    /// left in place and replaced by the caller's next insert).
    pub fn get(&self, symbol: &str, now: DateTime<Utc>) -> Option<PredictionResult> {
        let entries = self.entries.lock().unwrap();
        let entry = entries.get(symbol)?;
        if now.signed_duration_since(entry.inserted_at) < self.ttl {
            Some(entry.prediction.clone())
        } else {
            None
        }
    }

    /// Insert or wholesale-replace the entry for the prediction's symbol.
    pub fn insert(&self, prediction: PredictionResult, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            prediction.symbol.clone(),
            CacheEntry {
                prediction,
                inserted_at: now,
            },
        );
    }

    /// Drop every entry (manual forced invalidation).
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
