//! Metrics collection and reporting
//!
//! This module provides:
//! - Allocation accounting via a counting global allocator
//! - Per-mode metrics aggregation for the standard/optimized comparison
//! - Per-case export records
//! - Console/JSON/CSV reporting

pub mod alloc;
pub mod collector;
pub mod reporter;

pub use alloc::{format_bytes, AllocSample, AllocSnapshot, CountingAllocator};
pub use collector::{CaseMetrics, MetricsCollector, ModeMetrics, ModeSummary};
pub use reporter::{BenchmarkResults, MetricsReporter, OutputFormat};
