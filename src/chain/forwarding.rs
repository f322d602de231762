//! Forwarding call chain
//!
//! A configurable number of pass-through layers sit between the caller and
//! the data source. The mode decides whether each layer re-enters the
//! scheduler on the way back (standard) or hands the pending result straight
//! through (optimized). Output is identical either way; only the suspension
//! count differs.

use std::sync::Arc;
use std::time::Duration;

use super::data_source::FakeDataSource;
use super::mode::ForwardingMode;
use super::probe::SuspensionProbe;

/// A call chain of forwarding layers over a fake data source
pub struct ForwardingChain {
    source: FakeDataSource,
    probe: Arc<SuspensionProbe>,
    mode: ForwardingMode,
    depth: usize,
}

impl ForwardingChain {
    /// Create a chain with its own probe
    pub fn new(mode: ForwardingMode, depth: usize, delay: Duration) -> Self {
        Self::with_probe(mode, depth, delay, Arc::new(SuspensionProbe::new()))
    }

    /// Create a chain recording onto a shared probe
    pub fn with_probe(
        mode: ForwardingMode,
        depth: usize,
        delay: Duration,
        probe: Arc<SuspensionProbe>,
    ) -> Self {
        Self {
            source: FakeDataSource::new(delay, Arc::clone(&probe)),
            probe,
            mode,
            depth,
        }
    }

    pub fn mode(&self) -> ForwardingMode {
        self.mode
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The chain's suspension probe
    pub fn probe(&self) -> &Arc<SuspensionProbe> {
        &self.probe
    }

    /// Suspension events one call is expected to record
    pub fn suspensions_per_call(&self) -> u64 {
        self.mode.suspensions_per_call(self.depth)
    }

    /// Fetch the product through every forwarding layer
    ///
    /// Both modes resolve to the same payload. Standard mode suspends once
    /// per layer on top of the data source's own suspension; optimized mode
    /// relays the pending result without re-entering the scheduler.
    pub async fn fetch(&self) -> String {
        match self.mode {
            ForwardingMode::Standard => {
                let product = self.source.fetch().await;
                for _ in 0..self.depth {
                    self.probe.record();
                    tokio::task::yield_now().await;
                }
                product
            }
            ForwardingMode::Optimized => self.source.fetch().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::data_source::PRODUCT_DETAILS;

    fn chain(mode: ForwardingMode, depth: usize) -> ForwardingChain {
        ForwardingChain::new(mode, depth, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_both_modes_return_same_payload() {
        let standard = chain(ForwardingMode::Standard, 2);
        let optimized = chain(ForwardingMode::Optimized, 2);

        assert_eq!(standard.fetch().await, PRODUCT_DETAILS);
        assert_eq!(optimized.fetch().await, PRODUCT_DETAILS);
    }

    #[tokio::test]
    async fn test_standard_suspends_per_layer() {
        let chain = chain(ForwardingMode::Standard, 2);

        chain.fetch().await;
        assert_eq!(chain.probe().count(), 3);

        chain.fetch().await;
        assert_eq!(chain.probe().count(), 6);
    }

    #[tokio::test]
    async fn test_optimized_suspends_once() {
        let chain = chain(ForwardingMode::Optimized, 2);

        chain.fetch().await;
        assert_eq!(chain.probe().count(), 1);

        chain.fetch().await;
        assert_eq!(chain.probe().count(), 2);
    }

    #[tokio::test]
    async fn test_expected_counts_match_observed() {
        for depth in [1usize, 2, 5] {
            for mode in [ForwardingMode::Standard, ForwardingMode::Optimized] {
                let chain = chain(mode, depth);
                chain.fetch().await;
                assert_eq!(chain.probe().count(), chain.suspensions_per_call());
            }
        }
    }

    #[tokio::test]
    async fn test_repeated_fetches_stay_constant() {
        let chain = chain(ForwardingMode::Standard, 2);
        for _ in 0..10 {
            assert_eq!(chain.fetch().await, PRODUCT_DETAILS);
        }
    }
}
