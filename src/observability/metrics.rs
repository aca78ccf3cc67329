//! Metrics registry for songbook
//!
//! Counters only, monotonic, reset on process start.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters shared by the HTTP layer and the song service
///
/// All counters use Relaxed atomics; values are exact but not ordered
/// relative to each other.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    requests_total: AtomicU64,
    requests_failed: AtomicU64,
    songs_created: AtomicU64,
    songs_updated: AtomicU64,
    songs_deleted: AtomicU64,
    business_rejections: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a served request; `failed` for any 4xx/5xx response
    pub fn record_request(&self, failed: bool) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.requests_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_songs_created(&self) {
        self.songs_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_songs_updated(&self) {
        self.songs_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_songs_deleted(&self) {
        self.songs_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_business_rejections(&self) {
        self.business_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            songs_created: self.songs_created.load(Ordering::Relaxed),
            songs_updated: self.songs_updated.load(Ordering::Relaxed),
            songs_deleted: self.songs_deleted.load(Ordering::Relaxed),
            business_rejections: self.business_rejections.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub requests_failed: u64,
    pub songs_created: u64,
    pub songs_updated: u64,
    pub songs_deleted: u64,
    pub business_rejections: u64,
}
