//! Last-known-rate fallback cache.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use converter_types::CurrencyCode;

/// A cached per-unit rate and when it was observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedRate {
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
}

/// In-memory map from an ordered (from, to) pair to the last-known
/// per-unit exchange rate.
///
/// A best-effort fallback, not a source of truth: concurrent writes for
/// the same pair are last-write-wins, entries never expire, and nothing
/// survives a restart.
#[derive(Debug, Default)]
pub struct RateCache {
    entries: DashMap<(CurrencyCode, CurrencyCode), CachedRate>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last-known rate for the pair, if any.
    ///
    /// Direction matters: X->Y and Y->X are distinct entries.
    pub fn get(&self, from: CurrencyCode, to: CurrencyCode) -> Option<CachedRate> {
        self.entries.get(&(from, to)).map(|entry| *entry)
    }

    /// Records a per-unit rate for the pair.
    ///
    /// Non-finite or negative rates are silently dropped; the cache must
    /// never hold a value that cannot be multiplied back into an amount.
    pub fn put(&self, from: CurrencyCode, to: CurrencyCode, rate: f64) {
        if !rate.is_finite() || rate < 0.0 {
            return;
        }
        self.entries.insert(
            (from, to),
            CachedRate {
                rate,
                fetched_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
