//! Metrics reporter - output formatting and export
//!
//! Supports multiple output formats:
//! - Console (human-readable)
//! - JSON
//! - CSV

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use super::collector::{CaseMetrics, ModeSummary};

/// Output format for metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
}

/// Metrics reporter
pub struct MetricsReporter {
    format: OutputFormat,
}

impl MetricsReporter {
    /// Create new reporter with specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report a finished case to stdout
    pub fn report_case(&self, metrics: &CaseMetrics) {
        match self.format {
            OutputFormat::Console => self.report_console(metrics),
            OutputFormat::Json => self.report_json(metrics),
            OutputFormat::Csv => self.report_csv(metrics),
        }
    }

    /// Report to console (human-readable)
    fn report_console(&self, metrics: &CaseMetrics) {
        println!("\n=== {} ===", metrics.case_name);
        println!(
            "Mode: {} | Fan-out: {} | Iterations: {}",
            metrics.mode, metrics.fanout, metrics.iterations
        );
        println!(
            "Throughput: {:.0} calls/sec | Invocations: {} | Duration: {:.2}s{}",
            metrics.throughput,
            metrics.total_invocations,
            metrics.duration_secs,
            if metrics.total_errors > 0 {
                format!(" | Errors: {}", metrics.total_errors)
            } else {
                String::new()
            }
        );
        println!(
            "Latency (ms): avg={:.3} p50={:.3} p95={:.3} p99={:.3} p99.9={:.3} max={:.3}",
            metrics.mean_latency_ms,
            metrics.p50_latency_ms,
            metrics.p95_latency_ms,
            metrics.p99_latency_ms,
            metrics.p999_latency_ms,
            metrics.max_latency_ms
        );
        println!(
            "Suspensions: {} total, {:.2} per call",
            metrics.suspensions, metrics.suspensions_per_call
        );

        if let Some(ref alloc) = metrics.alloc {
            println!("Heap: {}", alloc.format());
        }
    }

    /// Report as JSON
    fn report_json(&self, metrics: &CaseMetrics) {
        println!(
            "{}",
            serde_json::to_string_pretty(&metrics.to_json()).unwrap_or_default()
        );
    }

    /// Report as CSV (single row)
    fn report_csv(&self, metrics: &CaseMetrics) {
        println!("{}", metrics.to_csv_row());
    }

    /// Print the standard-vs-optimized comparison to console
    pub fn report_comparison(&self, summaries: &[ModeSummary]) {
        if summaries.is_empty() {
            return;
        }

        println!("\nPer-mode comparison:");
        println!(
            "{:12} {:>6} {:>12} {:>14} {:>10} {:>12} {:>10} {:>10}",
            "Mode", "Cases", "Invocations", "Suspensions", "Susp/call", "Throughput", "p99 (ms)", "Max (ms)"
        );
        println!("{}", "-".repeat(92));

        for summary in summaries {
            println!(
                "{:12} {:>6} {:>12} {:>14} {:>10.2} {:>12.0} {:>10.3} {:>10.3}",
                summary.mode.as_str(),
                summary.cases,
                summary.total_invocations,
                summary.total_suspensions,
                summary.suspensions_per_call,
                summary.throughput,
                summary.p99_latency_ms,
                summary.max_latency_ms
            );
        }
    }

    /// Write case metrics to CSV file
    pub fn write_csv_file(&self, path: &Path, cases: &[CaseMetrics]) -> io::Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "{}", CaseMetrics::csv_header())?;
        for case in cases {
            writeln!(file, "{}", case.to_csv_row())?;
        }

        Ok(())
    }
}

/// Benchmark results collection for export
#[derive(Debug)]
pub struct BenchmarkResults {
    /// All case results
    pub cases: Vec<CaseMetrics>,
    /// Per-mode aggregates
    pub comparison: Vec<ModeSummary>,
    /// Configuration summary
    pub config_summary: String,
}

impl BenchmarkResults {
    /// Create new results collection
    pub fn new(config_summary: &str) -> Self {
        Self {
            cases: Vec::new(),
            comparison: Vec::new(),
            config_summary: config_summary.to_string(),
        }
    }

    /// Add a case result
    pub fn add_case(&mut self, case: CaseMetrics) {
        self.cases.push(case);
    }

    /// Set the per-mode comparison
    pub fn set_comparison(&mut self, comparison: Vec<ModeSummary>) {
        self.comparison = comparison;
    }

    /// Export all results to JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "config": self.config_summary,
            "cases": self.cases.iter().map(|c| c.to_json()).collect::<Vec<_>>(),
            "comparison": self.comparison.iter().map(|s| s.to_json()).collect::<Vec<_>>(),
        })
    }

    /// Write all results to JSON file
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(
            file,
            "{}",
            serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ForwardingMode;

    fn case(name: &str, mode: ForwardingMode) -> CaseMetrics {
        CaseMetrics {
            case_name: name.to_string(),
            mode,
            fanout: 10,
            iterations: 100,
            total_invocations: 1000,
            total_errors: 0,
            duration_secs: 1.2,
            throughput: 833.3,
            mean_latency_ms: 1.2,
            p50_latency_ms: 1.1,
            p95_latency_ms: 1.4,
            p99_latency_ms: 1.6,
            p999_latency_ms: 1.7,
            max_latency_ms: 1.8,
            suspensions: 3000,
            suspensions_per_call: 3.0,
            alloc: None,
        }
    }

    #[test]
    fn test_output_format() {
        let reporter = MetricsReporter::new(OutputFormat::Console);
        assert_eq!(reporter.format, OutputFormat::Console);
    }

    #[test]
    fn test_benchmark_results() {
        let mut results = BenchmarkResults::new("depth=2, delay=1000us");

        results.add_case(case("standard_multiple_calls", ForwardingMode::Standard));
        results.add_case(case("optimized_multiple_calls", ForwardingMode::Optimized));
        assert_eq!(results.cases.len(), 2);

        let json = results.to_json();
        assert_eq!(json["config"], "depth=2, delay=1000us");
        assert_eq!(json["cases"].as_array().unwrap().len(), 2);
    }
}
