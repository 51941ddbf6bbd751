//! Pool-level counters.
//!
//! Counters are relaxed atomics so that `&self` reads (`get_item`) can record
//! hits and misses without a lock. Snapshots are point-in-time copies.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of pool-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolMetrics {
    pub hits: u64,
    pub misses: u64,
    pub saves: u64,
    pub deletes: u64,
    /// Reads that found a stored item past its expiration.
    pub expired: u64,
}

impl PoolMetrics {
    /// Fraction of reads that were hits, `0.0` if nothing was read.
    pub fn hit_ratio(&self) -> f64 {
        let reads = self.hits + self.misses;
        if reads == 0 {
            0.0
        } else {
            self.hits as f64 / reads as f64
        }
    }
}

/// Metric counters shared by pool implementations.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    saves: AtomicU64,
    deletes: AtomicU64,
    expired: AtomicU64,
}

impl PoolCounters {
    /// Snapshot current pool metrics.
    pub(crate) fn snapshot(&self) -> PoolMetrics {
        PoolMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            saves: self.saves.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn inc_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_save(&self) {
        self.saves.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }
}
