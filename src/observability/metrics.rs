//! Inventory counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Relaxed atomics; exactness across threads is not required

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Syncs started for a scope with a real machine
    sync_runs: AtomicU64,
    /// Syncs skipped because the scope was empty or all default
    sync_skips: AtomicU64,
    /// Syncs that returned an error
    sync_failures: AtomicU64,
    /// Records added or refreshed by syncs
    records_synced: AtomicU64,
    /// Records passed through the disclosure filter
    records_masked: AtomicU64,
    /// Writes that affected a record
    mutations_applied: AtomicU64,
    /// Writes that failed
    mutations_failed: AtomicU64,
}

/// Point-in-time copy of every counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub sync_runs: u64,
    pub sync_skips: u64,
    pub sync_failures: u64,
    pub records_synced: u64,
    pub records_masked: u64,
    pub mutations_applied: u64,
    pub mutations_failed: u64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_sync_runs(&self) {
        self.sync_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_sync_skips(&self) {
        self.sync_skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_sync_failures(&self) {
        self.sync_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_records_synced(&self, count: u64) {
        self.records_synced.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_records_masked(&self, count: u64) {
        self.records_masked.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_mutations_applied(&self) {
        self.mutations_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_mutations_failed(&self) {
        self.mutations_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sync_runs: self.sync_runs.load(Ordering::Relaxed),
            sync_skips: self.sync_skips.load(Ordering::Relaxed),
            sync_failures: self.sync_failures.load(Ordering::Relaxed),
            records_synced: self.records_synced.load(Ordering::Relaxed),
            records_masked: self.records_masked.load(Ordering::Relaxed),
            mutations_applied: self.mutations_applied.load(Ordering::Relaxed),
            mutations_failed: self.mutations_failed.load(Ordering::Relaxed),
        }
    }
}
