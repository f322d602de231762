//! Suspension-event instrumentation
//!
//! Every point where a call chain hands control back to the scheduler bumps
//! this counter immediately before suspending, so the difference between the
//! two forwarding modes is a countable event rather than a timing artifact.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counter of scheduler re-entries
///
/// One probe is shared by a chain's data source and its forwarding layers.
/// Counts only ever increase; callers diff against an earlier reading to
/// attribute events to a batch.
#[derive(Debug, Default)]
pub struct SuspensionProbe {
    suspensions: AtomicU64,
}

impl SuspensionProbe {
    /// Create a new probe with a zeroed counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one suspension event
    #[inline]
    pub fn record(&self) {
        self.suspensions.fetch_add(1, Ordering::Relaxed);
    }

    /// Total suspension events recorded so far
    #[inline]
    pub fn count(&self) -> u64 {
        self.suspensions.load(Ordering::Relaxed)
    }

    /// Events recorded since an earlier `count()` reading
    #[inline]
    pub fn since(&self, baseline: u64) -> u64 {
        self.count().saturating_sub(baseline)
    }
}
