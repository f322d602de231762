//! Command-line argument parsing
//!
//! Arguments are grouped by category for clarity. The single positional
//! token selects a benchmark suite; without it the harness drops into the
//! interactive menu.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Micro-benchmark harness comparing awaited vs tail-forwarded async call chains
#[derive(Parser, Debug, Clone)]
#[command(name = "chainbench")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Benchmark suite to run: async, gc, memory, statemachine, all
    /// (interactive menu when omitted)
    pub suite: Option<String>,

    // ===== Chain Shape =====
    /// Forwarding layers between the entry point and the data source
    #[arg(long = "depth", default_value_t = 2)]
    pub depth: usize,

    /// Simulated downstream latency in microseconds
    #[arg(long = "delay-us", default_value_t = 1000)]
    pub delay_us: u64,

    // ===== Measurement =====
    /// Iterations per benchmark case (0 = per-case default)
    #[arg(long = "iterations", default_value_t = 0)]
    pub iterations: u32,

    /// Warmup iterations before measurement
    #[arg(long = "warmup", default_value_t = 5)]
    pub warmup: u32,

    /// Worker threads for the async runtime (0 = auto-detect)
    #[arg(long = "threads", default_value_t = 0)]
    pub threads: u32,

    // ===== Output Options =====
    /// Output file path (JSON)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output CSV file for per-case stats
    #[arg(long = "csv")]
    pub csv_output: Option<PathBuf>,

    /// Output format
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    // ===== HTTP Mode =====
    /// Serve the product endpoints over HTTP instead of running benchmarks
    #[arg(long = "serve")]
    pub serve: bool,

    /// Bind address for --serve
    #[arg(long = "bind", default_value = "127.0.0.1")]
    pub bind: String,

    /// Listen port for --serve
    #[arg(short = 'p', long = "port", default_value_t = 5272)]
    pub port: u16,
}

/// Output format for results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        // At least one forwarding layer; depth 0 would collapse the two
        // modes into the same chain
        if self.depth == 0 {
            return Err("--depth must be at least 1".to_string());
        }

        if self.quiet && self.verbose {
            return Err("--quiet and --verbose are mutually exclusive".to_string());
        }

        // A suite token is meaningless in serve mode
        if self.serve && self.suite.is_some() {
            return Err("--serve does not take a suite argument".to_string());
        }

        Ok(())
    }

    /// Get effective number of threads (0 = auto-detect)
    pub fn effective_threads(&self) -> u32 {
        if self.threads == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get() as u32)
                .unwrap_or(4)
        } else {
            self.threads
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("chainbench").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = args(&[]);
        assert_eq!(args.suite, None);
        assert_eq!(args.depth, 2);
        assert_eq!(args.delay_us, 1000);
        assert_eq!(args.port, 5272);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_suite_token() {
        let args = args(&["statemachine", "--iterations", "10"]);
        assert_eq!(args.suite.as_deref(), Some("statemachine"));
        assert_eq!(args.iterations, 10);
    }

    #[test]
    fn test_depth_zero_rejected() {
        assert!(args(&["--depth", "0"]).validate().is_err());
    }

    #[test]
    fn test_quiet_verbose_conflict() {
        assert!(args(&["-q", "-v"]).validate().is_err());
    }

    #[test]
    fn test_serve_rejects_suite() {
        assert!(args(&["async", "--serve"]).validate().is_err());
        assert!(args(&["--serve"]).validate().is_ok());
    }

    #[test]
    fn test_effective_threads() {
        assert!(args(&[]).effective_threads() >= 1);
        assert_eq!(args(&["--threads", "3"]).effective_threads(), 3);
    }
}
