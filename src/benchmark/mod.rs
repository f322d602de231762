//! Benchmark orchestration and fan-out execution
//!
//! This module provides the measurement machinery:
//! - GlobalCounters: atomic counters shared with the progress reporter
//! - FanOutRunner: issues k concurrent invocations and joins them all
//! - SuiteType/CaseSpec: the benchmark suites and their cases
//! - Orchestrator: coordinates warmup, measurement, and aggregation

pub mod counters;
pub mod orchestrator;
pub mod runner;
pub mod suite;

pub use counters::GlobalCounters;
pub use orchestrator::{format_count, format_throughput, CaseResult, Orchestrator};
pub use runner::{BatchResult, FanOutRunner};
pub use suite::{CaseSpec, SuiteType};
