//! Lookup Statistics Module
//!
//! Lock-free counters describing how product lookups were served.

use std::sync::atomic::{AtomicU64, Ordering};

// == Lookup Stats ==
/// Shared counters, updated from concurrent lookups without locking.
#[derive(Debug, Default)]
pub struct LookupStats {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_faults: AtomicU64,
    store_misses: AtomicU64,
    write_back_failures: AtomicU64,
}

impl LookupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Transport failure or undecodable entry.
    pub fn record_fault(&self) {
        self.cache_faults.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_miss(&self) {
        self.store_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_back_failure(&self) {
        self.write_back_failures.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the current counter values.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_faults: self.cache_faults.load(Ordering::Relaxed),
            store_misses: self.store_misses.load(Ordering::Relaxed),
            write_back_failures: self.write_back_failures.load(Ordering::Relaxed),
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time copy of [`LookupStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_faults: u64,
    pub store_misses: u64,
    pub write_back_failures: u64,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookup reached a verdict.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}
