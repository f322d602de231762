//! Metrics collection and per-mode aggregation
//!
//! Thread-safe collector keyed by forwarding mode; every finished case folds
//! its numbers in, and the final comparison reads the per-mode aggregates.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hdrhistogram::Histogram;
use parking_lot::{Mutex, RwLock};

use crate::chain::ForwardingMode;
use crate::metrics::alloc::AllocSample;

/// Accumulated metrics for one forwarding mode
pub struct ModeMetrics {
    /// Mode these metrics belong to
    pub mode: ForwardingMode,
    /// Cases folded in
    pub cases: AtomicU64,
    /// Total invocations completed
    pub invocations: AtomicU64,
    /// Total suspension events recorded
    pub suspensions: AtomicU64,
    /// Total errors
    pub errors: AtomicU64,
    /// Accumulated case wall time in microseconds
    duration_us: AtomicU64,
    /// Merged latency histogram (microseconds)
    histogram: Mutex<Histogram<u64>>,
}

impl ModeMetrics {
    /// Create zeroed metrics for a mode
    pub fn new(mode: ForwardingMode) -> Self {
        Self {
            mode,
            cases: AtomicU64::new(0),
            invocations: AtomicU64::new(0),
            suspensions: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            duration_us: AtomicU64::new(0),
            histogram: Mutex::new(
                Histogram::new_with_bounds(1, 3_600_000_000, 3)
                    .expect("Failed to create histogram"),
            ),
        }
    }

    /// Fold one finished case into the aggregate
    pub fn record_case(
        &self,
        invocations: u64,
        suspensions: u64,
        errors: u64,
        duration: Duration,
        histogram: &Histogram<u64>,
    ) {
        self.cases.fetch_add(1, Ordering::Relaxed);
        self.invocations.fetch_add(invocations, Ordering::Relaxed);
        self.suspensions.fetch_add(suspensions, Ordering::Relaxed);
        self.errors.fetch_add(errors, Ordering::Relaxed);
        self.duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.histogram.lock().add(histogram).ok();
    }

    /// Produce an aggregate summary
    pub fn summary(&self) -> ModeSummary {
        let histogram = self.histogram.lock();
        let invocations = self.invocations.load(Ordering::Relaxed);
        let suspensions = self.suspensions.load(Ordering::Relaxed);
        let duration_secs = self.duration_us.load(Ordering::Relaxed) as f64 / 1_000_000.0;

        ModeSummary {
            mode: self.mode,
            cases: self.cases.load(Ordering::Relaxed),
            total_invocations: invocations,
            total_suspensions: suspensions,
            suspensions_per_call: if invocations > 0 {
                suspensions as f64 / invocations as f64
            } else {
                0.0
            },
            total_errors: self.errors.load(Ordering::Relaxed),
            duration_secs,
            throughput: if duration_secs > 0.0 {
                invocations as f64 / duration_secs
            } else {
                0.0
            },
            mean_latency_ms: histogram.mean() / 1000.0,
            p50_latency_ms: histogram.value_at_percentile(50.0) as f64 / 1000.0,
            p95_latency_ms: histogram.value_at_percentile(95.0) as f64 / 1000.0,
            p99_latency_ms: histogram.value_at_percentile(99.0) as f64 / 1000.0,
            max_latency_ms: histogram.max() as f64 / 1000.0,
        }
    }
}

/// Aggregated metrics collector, one entry per forwarding mode
pub struct MetricsCollector {
    modes: RwLock<HashMap<ForwardingMode, Arc<ModeMetrics>>>,
}

impl MetricsCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self {
            modes: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create metrics for a mode
    pub fn get_or_create(&self, mode: ForwardingMode) -> Arc<ModeMetrics> {
        // First try read lock
        {
            let modes = self.modes.read();
            if let Some(metrics) = modes.get(&mode) {
                return Arc::clone(metrics);
            }
        }

        let mut modes = self.modes.write();
        Arc::clone(
            modes
                .entry(mode)
                .or_insert_with(|| Arc::new(ModeMetrics::new(mode))),
        )
    }

    /// Per-mode summaries, standard before optimized
    pub fn summaries(&self) -> Vec<ModeSummary> {
        let modes = self.modes.read();
        let mut summaries: Vec<ModeSummary> = modes.values().map(|m| m.summary()).collect();
        summaries.sort_by_key(|s| s.mode != ForwardingMode::Standard);
        summaries
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate numbers for one forwarding mode across all its cases
#[derive(Debug, Clone)]
pub struct ModeSummary {
    pub mode: ForwardingMode,
    pub cases: u64,
    pub total_invocations: u64,
    pub total_suspensions: u64,
    pub suspensions_per_call: f64,
    pub total_errors: u64,
    pub duration_secs: f64,
    pub throughput: f64,
    pub mean_latency_ms: f64,
    pub p50_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub max_latency_ms: f64,
}

impl ModeSummary {
    /// Convert to JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "mode": self.mode.as_str(),
            "cases": self.cases,
            "total_invocations": self.total_invocations,
            "total_suspensions": self.total_suspensions,
            "suspensions_per_call": self.suspensions_per_call,
            "total_errors": self.total_errors,
            "duration_secs": self.duration_secs,
            "throughput": self.throughput,
            "latency": {
                "mean_ms": self.mean_latency_ms,
                "p50_ms": self.p50_latency_ms,
                "p95_ms": self.p95_latency_ms,
                "p99_ms": self.p99_latency_ms,
                "max_ms": self.max_latency_ms
            }
        })
    }
}

/// Per-case metrics in export form
#[derive(Debug, Clone)]
pub struct CaseMetrics {
    pub case_name: String,
    pub mode: ForwardingMode,
    pub fanout: usize,
    pub iterations: u32,
    pub total_invocations: u64,
    pub total_errors: u64,
    pub duration_secs: f64,
    pub throughput: f64,
    pub mean_latency_ms: f64,
    pub p50_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub p999_latency_ms: f64,
    pub max_latency_ms: f64,
    pub suspensions: u64,
    pub suspensions_per_call: f64,
    pub alloc: Option<AllocSample>,
}

impl CaseMetrics {
    /// Convert to JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "case": self.case_name,
            "mode": self.mode.as_str(),
            "fanout": self.fanout,
            "iterations": self.iterations,
            "total_invocations": self.total_invocations,
            "total_errors": self.total_errors,
            "duration_secs": self.duration_secs,
            "throughput": self.throughput,
            "latency": {
                "mean_ms": self.mean_latency_ms,
                "p50_ms": self.p50_latency_ms,
                "p95_ms": self.p95_latency_ms,
                "p99_ms": self.p99_latency_ms,
                "p999_ms": self.p999_latency_ms,
                "max_ms": self.max_latency_ms
            },
            "suspensions": {
                "total": self.suspensions,
                "per_call": self.suspensions_per_call
            }
        });

        if let Some(ref alloc) = self.alloc {
            value["allocations"] = serde_json::to_value(alloc).unwrap_or_default();
        }

        value
    }

    /// CSV header matching `to_csv_row`
    pub fn csv_header() -> &'static str {
        "case,mode,fanout,iterations,total_invocations,errors,duration_secs,throughput,\
         mean_ms,p50_ms,p95_ms,p99_ms,p999_ms,max_ms,suspensions,suspensions_per_call"
    }

    /// Format as one CSV row
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.3},{:.2},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{},{:.2}",
            self.case_name,
            self.mode.as_str(),
            self.fanout,
            self.iterations,
            self.total_invocations,
            self.total_errors,
            self.duration_secs,
            self.throughput,
            self.mean_latency_ms,
            self.p50_latency_ms,
            self.p95_latency_ms,
            self.p99_latency_ms,
            self.p999_latency_ms,
            self.max_latency_ms,
            self.suspensions,
            self.suspensions_per_call
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_histogram(values: &[u64]) -> Histogram<u64> {
        let mut h = Histogram::new_with_bounds(1, 3_600_000_000, 3).unwrap();
        for v in values {
            h.record(*v).unwrap();
        }
        h
    }

    #[test]
    fn test_collector_get_or_create() {
        let collector = MetricsCollector::new();

        let m1 = collector.get_or_create(ForwardingMode::Standard);
        let m2 = collector.get_or_create(ForwardingMode::Standard);

        // Should return same metrics instance
        assert!(Arc::ptr_eq(&m1, &m2));
    }

    #[test]
    fn test_mode_aggregation() {
        let collector = MetricsCollector::new();

        let standard = collector.get_or_create(ForwardingMode::Standard);
        standard.record_case(
            100,
            300,
            0,
            Duration::from_millis(120),
            &sample_histogram(&[1000, 1200]),
        );
        standard.record_case(
            50,
            150,
            0,
            Duration::from_millis(80),
            &sample_histogram(&[1100]),
        );

        let optimized = collector.get_or_create(ForwardingMode::Optimized);
        optimized.record_case(
            100,
            100,
            0,
            Duration::from_millis(100),
            &sample_histogram(&[900]),
        );

        let summaries = collector.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].mode, ForwardingMode::Standard);
        assert_eq!(summaries[0].cases, 2);
        assert_eq!(summaries[0].total_invocations, 150);
        assert_eq!(summaries[0].total_suspensions, 450);
        assert!((summaries[0].suspensions_per_call - 3.0).abs() < 1e-9);
        assert_eq!(summaries[1].mode, ForwardingMode::Optimized);
        assert!((summaries[1].suspensions_per_call - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_metrics_json() {
        let metrics = CaseMetrics {
            case_name: "standard_single_call".to_string(),
            mode: ForwardingMode::Standard,
            fanout: 1,
            iterations: 100,
            total_invocations: 100,
            total_errors: 0,
            duration_secs: 0.12,
            throughput: 833.3,
            mean_latency_ms: 1.2,
            p50_latency_ms: 1.1,
            p95_latency_ms: 1.4,
            p99_latency_ms: 1.6,
            p999_latency_ms: 1.7,
            max_latency_ms: 1.8,
            suspensions: 300,
            suspensions_per_call: 3.0,
            alloc: None,
        };

        let json = metrics.to_json();
        assert_eq!(json["case"], "standard_single_call");
        assert_eq!(json["suspensions"]["total"], 300);
        assert!(json.get("allocations").is_none());
    }

    #[test]
    fn test_csv_row_matches_header() {
        let header_fields = CaseMetrics::csv_header().split(',').count();
        let metrics = CaseMetrics {
            case_name: "optimized_single_call".to_string(),
            mode: ForwardingMode::Optimized,
            fanout: 1,
            iterations: 10,
            total_invocations: 10,
            total_errors: 0,
            duration_secs: 0.01,
            throughput: 1000.0,
            mean_latency_ms: 1.0,
            p50_latency_ms: 1.0,
            p95_latency_ms: 1.0,
            p99_latency_ms: 1.0,
            p999_latency_ms: 1.0,
            max_latency_ms: 1.0,
            suspensions: 10,
            suspensions_per_call: 1.0,
            alloc: None,
        };
        assert_eq!(metrics.to_csv_row().split(',').count(), header_fields);
    }
}
