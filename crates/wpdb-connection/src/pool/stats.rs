//! Pool statistics types

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Snapshot of the connection manager's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Number of entries currently in the pool
    entries: usize,
    /// Cache hits (validated cached connection handed out)
    hits: u64,
    /// Cache misses (no usable cached connection for the key)
    misses: u64,
    /// Physical connections opened
    created: u64,
    /// Physical connections closed (eviction, invalidation, explicit close)
    closed: u64,
    /// Entries removed by the expiry sweep
    evicted: u64,
    /// Cached entries that failed validation and were replaced
    invalidated: u64,
}

impl PoolStats {
    /// Number of entries currently in the pool
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Cache hits
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Cache misses
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Physical connections opened
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Physical connections closed
    pub fn closed(&self) -> u64 {
        self.closed
    }

    /// Entries removed by the expiry sweep
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Cached entries that failed validation
    pub fn invalidated(&self) -> u64 {
        self.invalidated
    }

    /// Fraction of lookups served from the cache (0.0 to 1.0)
    ///
    /// Returns 0.0 when no lookups have happened yet.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// Atomic counters updated concurrently by the manager
#[derive(Debug, Default)]
pub(super) struct PoolCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    created: AtomicU64,
    closed: AtomicU64,
    evicted: AtomicU64,
    invalidated: AtomicU64,
}

impl PoolCounters {
    pub(super) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_closed(&self) {
        self.closed.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_evicted(&self) {
        self.evicted.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_invalidated(&self) {
        self.invalidated.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot current counters together with the live entry count
    pub(super) fn snapshot(&self, entries: usize) -> PoolStats {
        PoolStats {
            entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            closed: self.closed.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            invalidated: self.invalidated.load(Ordering::Relaxed),
        }
    }
}
