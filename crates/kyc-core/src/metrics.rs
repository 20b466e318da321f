//! Global atomic counters for lifecycle observability.
//!
//! Counters are incremented silently by the engine. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::KycStatus;

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters, no allocations, no locking.
pub struct Metrics {
    records_created: AtomicU64,
    records_verified: AtomicU64,
    records_rejected: AtomicU64,
    records_expired: AtomicU64,
    precondition_failures: AtomicU64,
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub records_created: u64,
    pub records_verified: u64,
    pub records_rejected: u64,
    pub records_expired: u64,
    pub precondition_failures: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            records_created: AtomicU64::new(0),
            records_verified: AtomicU64::new(0),
            records_rejected: AtomicU64::new(0),
            records_expired: AtomicU64::new(0),
            precondition_failures: AtomicU64::new(0),
        }
    }

    /// Count a successful write that left the record in `status`.
    pub fn record_written(&self, status: KycStatus) {
        let (counter, metric) = match status {
            KycStatus::Pending => (&self.records_created, "records_created"),
            KycStatus::Verified => (&self.records_verified, "records_verified"),
            KycStatus::Rejected => (&self.records_rejected, "records_rejected"),
            KycStatus::Expired => (&self.records_expired, "records_expired"),
        };
        counter.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = metric, "counter incremented");
    }

    /// Count an operation refused by a precondition check.
    pub fn inc_precondition_failures(&self) {
        self.precondition_failures.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "precondition_failures", "counter incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_created: self.records_created.load(Ordering::Relaxed),
            records_verified: self.records_verified.load(Ordering::Relaxed),
            records_rejected: self.records_rejected.load(Ordering::Relaxed),
            records_expired: self.records_expired.load(Ordering::Relaxed),
            precondition_failures: self.precondition_failures.load(Ordering::Relaxed),
        }
    }

    /// Emit all current counter values as a single `info!` event.
    ///
    /// Call this at natural boundaries (batch end, shutdown) rather than on
    /// every increment.
    pub fn flush(&self) {
        let s = self.snapshot();
        tracing::info!(
            metric = "flush",
            records_created = s.records_created,
            records_verified = s.records_verified,
            records_rejected = s.records_rejected,
            records_expired = s.records_expired,
            precondition_failures = s.precondition_failures,
        );
    }
}
