//! Global atomic counters for progress tracking
//!
//! These are the only synchronization points between the invocation tasks
//! and the progress reporter thread. All other state is task-local.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Global counters shared between invocation tasks and the progress reporter
///
/// Counter operations stay simple (fetch_add, relaxed ordering) to keep
/// contention out of the measured path.
pub struct GlobalCounters {
    /// Total invocations issued
    pub invocations_issued: AtomicU64,

    /// Total invocations completed
    pub invocations_finished: AtomicU64,

    /// Total batches completed (all member invocations joined)
    pub batches_completed: AtomicU64,

    /// Total errors encountered
    pub error_count: AtomicU64,

    /// Shutdown signal for the progress reporter
    pub shutdown: AtomicBool,

    /// Total invocation target (u64::MAX when unbounded)
    total_invocations: u64,
}

impl GlobalCounters {
    /// Create new counters initialized to zero (unbounded)
    pub fn new() -> Self {
        Self {
            invocations_issued: AtomicU64::new(0),
            invocations_finished: AtomicU64::new(0),
            batches_completed: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
            total_invocations: u64::MAX,
        }
    }

    /// Create counters with an invocation target
    pub fn with_total(total: u64) -> Self {
        Self {
            total_invocations: total,
            ..Self::new()
        }
    }

    /// Invocation target (u64::MAX when unbounded)
    pub fn total(&self) -> u64 {
        self.total_invocations
    }

    /// Record issued invocations
    #[inline]
    pub fn record_issued(&self, count: u64) {
        self.invocations_issued.fetch_add(count, Ordering::Relaxed);
    }

    /// Record completed invocations
    #[inline]
    pub fn record_finished(&self, count: u64) {
        self.invocations_finished.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a completed batch
    #[inline]
    pub fn record_batch(&self) {
        self.batches_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an error
    #[inline]
    pub fn record_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Check if the invocation target has been reached
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.invocations_finished.load(Ordering::Relaxed) >= self.total_invocations
    }

    /// Signal shutdown to the progress reporter
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Check if shutdown has been signaled
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Get current progress
    pub fn progress(&self) -> (u64, u64) {
        (
            self.invocations_finished.load(Ordering::Relaxed),
            self.invocations_issued.load(Ordering::Relaxed),
        )
    }

    /// Get completed batch count
    pub fn batches(&self) -> u64 {
        self.batches_completed.load(Ordering::Relaxed)
    }

    /// Get error count
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Reset all counters (for warmup -> measurement transition)
    pub fn reset(&self) {
        self.invocations_issued.store(0, Ordering::SeqCst);
        self.invocations_finished.store(0, Ordering::SeqCst);
        self.batches_completed.store(0, Ordering::SeqCst);
        self.error_count.store(0, Ordering::SeqCst);
    }
}

impl Default for GlobalCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_progress() {
        let counters = GlobalCounters::new();

        counters.record_issued(50);
        counters.record_finished(25);

        let (finished, issued) = counters.progress();
        assert_eq!(finished, 25);
        assert_eq!(issued, 50);
    }

    #[test]
    fn test_completion_target() {
        let counters = GlobalCounters::with_total(100);

        counters.record_finished(99);
        assert!(!counters.is_complete());

        counters.record_finished(1);
        assert!(counters.is_complete());
    }

    #[test]
    fn test_shutdown_signal() {
        let counters = GlobalCounters::new();

        assert!(!counters.is_shutdown());
        counters.signal_shutdown();
        assert!(counters.is_shutdown());
    }

    #[test]
    fn test_concurrent_finishes() {
        let counters = Arc::new(GlobalCounters::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = Arc::clone(&counters);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        c.record_finished(1);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(counters.progress().0, 4000);
    }

    #[test]
    fn test_reset() {
        let counters = GlobalCounters::with_total(100);

        counters.record_issued(50);
        counters.record_finished(25);
        counters.record_batch();
        counters.record_error();

        counters.reset();

        let (finished, issued) = counters.progress();
        assert_eq!(finished, 0);
        assert_eq!(issued, 0);
        assert_eq!(counters.batches(), 0);
        assert_eq!(counters.errors(), 0);
        // Target survives a reset
        assert_eq!(counters.total(), 100);
    }
}
