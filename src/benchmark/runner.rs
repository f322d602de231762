//! Fan-out batch execution
//!
//! Issues k concurrent invocations of a forwarding chain, joins them all,
//! and hands back the results in issuance order.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use hdrhistogram::Histogram;

use super::counters::GlobalCounters;
use crate::chain::ForwardingChain;
use crate::utils::{BenchmarkError, Result};

/// Result of one fan-out batch
pub struct BatchResult {
    /// Per-invocation payloads, in issuance order
    pub results: Vec<String>,
    /// Suspension events recorded during the batch
    pub suspensions: u64,
}

/// Issues batches of concurrent invocations against one chain
///
/// Latencies accumulate into the runner's histogram across batches; a case
/// drains it with `take_histogram` once measurement ends.
pub struct FanOutRunner {
    chain: Arc<ForwardingChain>,
    counters: Arc<GlobalCounters>,
    histogram: Histogram<u64>,
}

impl FanOutRunner {
    /// Create a runner for the given chain
    pub fn new(chain: Arc<ForwardingChain>, counters: Arc<GlobalCounters>) -> Self {
        Self {
            chain,
            counters,
            histogram: new_histogram(),
        }
    }

    /// Run one batch of `k` concurrent invocations
    ///
    /// The batch completes only when every member invocation has completed.
    /// Results come back in issuance order; with a constant payload the
    /// distinction is unobservable, but the contract holds regardless.
    pub async fn run_batch(&mut self, k: usize) -> Result<BatchResult> {
        if k == 0 {
            return Err(BenchmarkError::Config(
                "fan-out width must be at least 1".to_string(),
            ));
        }

        let suspensions_before = self.chain.probe().count();
        self.counters.record_issued(k as u64);

        let mut handles = Vec::with_capacity(k);
        for _ in 0..k {
            let chain = Arc::clone(&self.chain);
            let counters = Arc::clone(&self.counters);
            handles.push(tokio::spawn(async move {
                let start = Instant::now();
                let product = chain.fetch().await;
                counters.record_finished(1);
                (product, start.elapsed().as_micros() as u64)
            }));
        }

        // Join preserves issuance order regardless of completion order
        let mut results = Vec::with_capacity(k);
        for joined in join_all(handles).await {
            let (product, latency_us) = joined.map_err(|e| {
                self.counters.record_error();
                BenchmarkError::Worker(format!("invocation task failed: {}", e))
            })?;
            self.histogram.record(latency_us.max(1)).ok();
            results.push(product);
        }

        self.counters.record_batch();

        Ok(BatchResult {
            results,
            suspensions: self.chain.probe().since(suspensions_before),
        })
    }

    /// Latencies recorded so far (microseconds)
    pub fn histogram(&self) -> &Histogram<u64> {
        &self.histogram
    }

    /// Drain the histogram, leaving a fresh one behind
    pub fn take_histogram(&mut self) -> Histogram<u64> {
        std::mem::replace(&mut self.histogram, new_histogram())
    }

    /// Discard recorded latencies (warmup -> measurement transition)
    pub fn reset(&mut self) {
        self.histogram.reset();
    }
}

fn new_histogram() -> Histogram<u64> {
    Histogram::new_with_bounds(1, 3_600_000_000, 3).expect("Failed to create histogram")
}
