//! chainbench library
//!
//! Micro-benchmark harness comparing two semantically identical async call
//! chains: a standard chain that re-enters the scheduler at every forwarding
//! layer, and an optimized chain that tail-forwards the pending operation so
//! only the innermost await suspends.

pub mod benchmark;
pub mod chain;
pub mod config;
pub mod menu;
pub mod metrics;
pub mod server;
pub mod utils;
