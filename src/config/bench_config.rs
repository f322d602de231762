//! Benchmark configuration derived from CLI arguments

use super::cli::{CliArgs, OutputFormat};
use std::path::PathBuf;
use std::time::Duration;

/// Complete benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchConfig {
    // Chain shape
    pub depth: usize,
    pub delay_us: u64,

    // Measurement
    pub suite_token: Option<String>,
    pub iterations: u32,
    pub warmup: u32,
    pub threads: u32,

    // Output
    pub output_path: Option<PathBuf>,
    pub csv_output: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,

    // HTTP mode
    pub serve: bool,
    pub bind: String,
    pub port: u16,
}

impl BenchConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        // Validate first
        args.validate()?;

        Ok(Self {
            depth: args.depth,
            delay_us: args.delay_us,

            suite_token: args.suite.clone(),
            iterations: args.iterations,
            warmup: args.warmup,
            threads: args.effective_threads(),

            output_path: args.output.clone(),
            csv_output: args.csv_output.clone(),
            output_format: args.output_format,
            quiet: args.quiet,
            verbose: args.verbose,

            serve: args.serve,
            bind: args.bind.clone(),
            port: args.port,
        })
    }

    /// Simulated downstream latency as a duration
    pub fn delay(&self) -> Duration {
        Duration::from_micros(self.delay_us)
    }

    /// One-line summary embedded in exports
    pub fn summary(&self) -> String {
        format!(
            "depth={}, delay={}us, iterations={}, warmup={}, threads={}",
            self.depth,
            self.delay_us,
            if self.iterations == 0 {
                "default".to_string()
            } else {
                self.iterations.to_string()
            },
            self.warmup,
            self.threads
        )
    }
}
