//! Benchmark orchestrator
//!
//! Runs suites case by case, coordinates warmup, progress reporting, and
//! sampling, and folds per-case results into the cross-mode comparison.

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::counters::GlobalCounters;
use super::runner::FanOutRunner;
use super::suite::{CaseSpec, SuiteType};
use crate::chain::ForwardingChain;
use crate::config::BenchConfig;
use crate::metrics::{
    AllocSample, AllocSnapshot, BenchmarkResults, CaseMetrics, MetricsCollector, MetricsReporter,
    ModeSummary, OutputFormat,
};
use crate::utils::{BenchmarkError, Result};

/// Result of one benchmark case
pub struct CaseResult {
    /// Case specification this result belongs to
    pub spec: CaseSpec,
    /// Total invocations completed
    pub total_invocations: u64,
    /// Measured wall time
    pub duration: Duration,
    /// Throughput (invocations per second)
    pub throughput: f64,
    /// Merged latency histogram (microseconds)
    pub histogram: Histogram<u64>,
    /// Suspension events recorded during measurement
    pub suspensions: u64,
    /// Heap-activity delta, when the case samples allocations
    pub alloc: Option<AllocSample>,
    /// Total errors
    pub error_count: u64,
}

impl CaseResult {
    /// Get percentile latency in microseconds
    pub fn percentile_us(&self, p: f64) -> u64 {
        self.histogram.value_at_percentile(p)
    }

    /// Get percentile latency in milliseconds
    pub fn percentile_ms(&self, p: f64) -> f64 {
        self.percentile_us(p) as f64 / 1000.0
    }

    /// Average suspension events per invocation
    pub fn suspensions_per_call(&self) -> f64 {
        if self.total_invocations > 0 {
            self.suspensions as f64 / self.total_invocations as f64
        } else {
            0.0
        }
    }

    /// Convert to the export record form
    pub fn to_metrics(&self) -> CaseMetrics {
        CaseMetrics {
            case_name: self.spec.name.clone(),
            mode: self.spec.mode,
            fanout: self.spec.fanout,
            iterations: self.spec.iterations,
            total_invocations: self.total_invocations,
            total_errors: self.error_count,
            duration_secs: self.duration.as_secs_f64(),
            throughput: self.throughput,
            mean_latency_ms: self.histogram.mean() / 1000.0,
            p50_latency_ms: self.percentile_ms(50.0),
            p95_latency_ms: self.percentile_ms(95.0),
            p99_latency_ms: self.percentile_ms(99.0),
            p999_latency_ms: self.percentile_ms(99.9),
            max_latency_ms: self.histogram.max() as f64 / 1000.0,
            suspensions: self.suspensions,
            suspensions_per_call: self.suspensions_per_call(),
            alloc: self.alloc,
        }
    }
}

/// Benchmark orchestrator
pub struct Orchestrator {
    config: Arc<BenchConfig>,
    collector: MetricsCollector,
    reporter: MetricsReporter,
}

impl Orchestrator {
    /// Create new orchestrator
    pub fn new(config: BenchConfig) -> Self {
        let reporter = MetricsReporter::new(reporter_format(&config));
        Self {
            config: Arc::new(config),
            collector: MetricsCollector::new(),
            reporter,
        }
    }

    /// Run the given suites in order
    pub async fn run_suites(&self, suites: &[SuiteType]) -> Result<Vec<CaseResult>> {
        let mut results = Vec::new();
        for suite in suites {
            results.extend(self.run_suite(*suite).await?);
        }
        Ok(results)
    }

    /// Run a single suite
    pub async fn run_suite(&self, suite: SuiteType) -> Result<Vec<CaseResult>> {
        if !self.config.quiet {
            println!("\nRunning suite: {}", suite);
        }

        let mut results = Vec::new();
        for spec in suite.cases(self.config.iterations) {
            info!("Running case: {}", spec.name);
            let result = self.run_case(&spec).await?;
            if !self.config.quiet {
                self.reporter.report_case(&result.to_metrics());
            }
            results.push(result);
        }

        Ok(results)
    }

    /// Run one benchmark case: warmup, then measured iterations
    async fn run_case(&self, spec: &CaseSpec) -> Result<CaseResult> {
        let chain = Arc::new(ForwardingChain::new(
            spec.mode,
            self.config.depth,
            self.config.delay(),
        ));
        let total = spec.total_invocations();
        let counters = Arc::new(GlobalCounters::with_total(total));
        let mut runner = FanOutRunner::new(Arc::clone(&chain), Arc::clone(&counters));

        // Warmup primes the runtime and the timer wheel before measurement
        for _ in 0..self.config.warmup {
            for _ in 0..spec.batches_per_iteration {
                runner.run_batch(spec.fanout).await?;
            }
        }
        runner.reset();
        counters.reset();

        // Progress reporting (if not quiet)
        if !self.config.quiet {
            let counters_clone = Arc::clone(&counters);
            thread::spawn(move || {
                report_progress(&counters_clone, total);
            });
        }

        let alloc_before = if spec.sample_alloc {
            Some(AllocSnapshot::capture())
        } else {
            None
        };
        let suspensions_before = chain.probe().count();
        let start = Instant::now();

        for _ in 0..spec.iterations {
            for _ in 0..spec.batches_per_iteration {
                runner.run_batch(spec.fanout).await?;
            }
        }

        let duration = start.elapsed();
        counters.signal_shutdown();

        let suspensions = chain.probe().since(suspensions_before);
        let alloc =
            alloc_before.map(|before| AllocSample::between(&before, &AllocSnapshot::capture()));

        let total_invocations = counters.progress().0;
        let throughput = if duration.as_secs_f64() > 0.0 {
            total_invocations as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        let histogram = runner.take_histogram();
        self.collector
            .get_or_create(spec.mode)
            .record_case(total_invocations, suspensions, counters.errors(), duration, &histogram);

        Ok(CaseResult {
            spec: spec.clone(),
            total_invocations,
            duration,
            throughput,
            histogram,
            suspensions,
            alloc,
            error_count: counters.errors(),
        })
    }

    /// Per-mode comparison across everything run so far
    pub fn comparison(&self) -> Vec<ModeSummary> {
        self.collector.summaries()
    }

    /// Print the standard-vs-optimized comparison
    pub fn print_comparison(&self) {
        self.reporter.report_comparison(&self.comparison());
    }

    /// Export results to JSON file
    pub fn export_json(&self, results: &[CaseResult], path: &Path) -> Result<()> {
        let mut export = BenchmarkResults::new(&self.config.summary());
        for result in results {
            export.add_case(result.to_metrics());
        }
        export.set_comparison(self.comparison());

        export
            .write_json(path)
            .map_err(|e| BenchmarkError::Export(format!("Failed to write JSON: {}", e)))
    }

    /// Export results to CSV file
    pub fn export_csv(&self, results: &[CaseResult], path: &Path) -> Result<()> {
        let cases: Vec<CaseMetrics> = results.iter().map(|r| r.to_metrics()).collect();
        self.reporter
            .write_csv_file(path, &cases)
            .map_err(|e| BenchmarkError::Export(format!("Failed to write CSV: {}", e)))
    }
}

/// Map the CLI output format onto the reporter's
fn reporter_format(config: &BenchConfig) -> OutputFormat {
    match config.output_format {
        crate::config::OutputFormat::Text => OutputFormat::Console,
        crate::config::OutputFormat::Json => OutputFormat::Json,
        crate::config::OutputFormat::Csv => OutputFormat::Csv,
    }
}

/// Report progress for one case until its target is reached
fn report_progress(counters: &GlobalCounters, total: u64) {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({msg})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut last_finished = 0u64;
    let mut last_time = start;

    while !counters.is_shutdown() {
        let (finished, _) = counters.progress();
        pb.set_position(finished);

        // Calculate current throughput without decimals
        let now = Instant::now();
        let interval = now.duration_since(last_time).as_secs_f64();
        if interval >= 0.5 {
            let throughput = (finished - last_finished) as f64 / interval;
            pb.set_message(format!("{}/s", format_count(throughput as u64)));
            last_finished = finished;
            last_time = now;
        }

        if finished >= total {
            break;
        }

        thread::sleep(Duration::from_millis(100));
    }

    pb.finish_and_clear();
}

/// Format throughput without meaningless decimals
pub fn format_throughput(throughput: f64) -> String {
    format_count(throughput as u64)
}

/// Format large numbers with thousands separators
/// Examples: 1,234,567 or 987,654
pub fn format_count(value: u64) -> String {
    let s = value.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::chain::ForwardingMode;
    use crate::config::CliArgs;

    fn test_config() -> BenchConfig {
        let args = CliArgs::parse_from([
            "chainbench",
            "--delay-us",
            "0",
            "--warmup",
            "1",
            "--iterations",
            "2",
            "--quiet",
        ]);
        BenchConfig::from_cli(&args).unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_suite_counts_everything() {
        let orchestrator = Orchestrator::new(test_config());

        let results = orchestrator
            .run_suite(SuiteType::AsyncMethods)
            .await
            .unwrap();

        // Three fan-out widths, both modes
        assert_eq!(results.len(), 6);

        for result in &results {
            assert_eq!(
                result.total_invocations,
                result.spec.total_invocations()
            );
            assert_eq!(result.error_count, 0);
            // Every measured invocation suspended the expected number of times
            let per_call = result.spec.mode.suspensions_per_call(2);
            assert_eq!(result.suspensions, result.total_invocations * per_call);
        }

        let comparison = orchestrator.comparison();
        assert_eq!(comparison.len(), 2);
        assert_eq!(comparison[0].mode, ForwardingMode::Standard);
        assert!((comparison[0].suspensions_per_call - 3.0).abs() < 1e-9);
        assert!((comparison[1].suspensions_per_call - 1.0).abs() < 1e-9);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_memory_suite_samples_allocations() {
        let orchestrator = Orchestrator::new(test_config());

        let results = orchestrator
            .run_suite(SuiteType::MemoryAnalysis)
            .await
            .unwrap();

        for result in &results {
            let alloc = result.alloc.expect("memory suite samples allocations");
            assert!(alloc.alloc_calls > 0);
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1), "1");
        assert_eq!(format_count(123), "123");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(123456), "123,456");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_throughput() {
        assert_eq!(format_throughput(937821.7051), "937,821");
        assert_eq!(format_throughput(123.456), "123");
    }
}
