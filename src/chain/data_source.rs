//! Simulated downstream data source
//!
//! Stands in for a database call: suspends for a short fixed duration and
//! returns a constant payload. This is the single genuine suspension point
//! in the call chain; it cannot fail.

use std::sync::Arc;
use std::time::Duration;

use super::probe::SuspensionProbe;

/// The constant payload every fetch produces
pub const PRODUCT_DETAILS: &str = "Product Details";

/// Fake database call with a fixed delay and a constant result
pub struct FakeDataSource {
    delay: Duration,
    probe: Arc<SuspensionProbe>,
}

impl FakeDataSource {
    /// Create a data source with the given delay, recording suspensions on
    /// the shared probe
    pub fn new(delay: Duration, probe: Arc<SuspensionProbe>) -> Self {
        Self { delay, probe }
    }

    /// Fetch the product payload
    ///
    /// Always succeeds. Suspends exactly once, even with a zero delay, so
    /// the recorded suspension count stays exact.
    pub async fn fetch(&self) -> String {
        self.probe.record();
        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.delay).await;
        }
        PRODUCT_DETAILS.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_returns_constant() {
        let probe = Arc::new(SuspensionProbe::new());
        let source = FakeDataSource::new(Duration::ZERO, probe);

        assert_eq!(source.fetch().await, PRODUCT_DETAILS);
    }

    #[tokio::test]
    async fn test_fetch_records_one_suspension() {
        let probe = Arc::new(SuspensionProbe::new());
        let source = FakeDataSource::new(Duration::ZERO, Arc::clone(&probe));

        source.fetch().await;
        assert_eq!(probe.count(), 1);

        source.fetch().await;
        source.fetch().await;
        assert_eq!(probe.count(), 3);
    }

    #[tokio::test]
    async fn test_fetch_is_idempotent() {
        let probe = Arc::new(SuspensionProbe::new());
        let source = FakeDataSource::new(Duration::from_micros(10), probe);

        for _ in 0..5 {
            assert_eq!(source.fetch().await, PRODUCT_DETAILS);
        }
    }
}
