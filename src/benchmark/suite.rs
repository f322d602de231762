//! Benchmark suite definitions
//!
//! Each suite is a fixed list of cases; a case pins one forwarding mode to a
//! fan-out width and an iteration count.

use crate::chain::ForwardingMode;

/// Supported benchmark suites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteType {
    /// Single / multiple / high-concurrency calls per mode
    AsyncMethods,
    /// Sustained allocation pressure at wide fan-outs
    AllocPressure,
    /// Before/after allocation sampling on a fixed fan-out
    MemoryAnalysis,
    /// Suspension-overhead sweep plus sustained throughput
    StateMachine,
}

impl SuiteType {
    /// Parse suite type from string (case-insensitive)
    ///
    /// `gc` and `alloc` both select the allocation-pressure suite.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "async" => Some(Self::AsyncMethods),
            "gc" | "alloc" => Some(Self::AllocPressure),
            "memory" => Some(Self::MemoryAnalysis),
            "statemachine" | "state-machine" => Some(Self::StateMachine),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsyncMethods => "async",
            Self::AllocPressure => "alloc",
            Self::MemoryAnalysis => "memory",
            Self::StateMachine => "statemachine",
        }
    }

    /// All suites, in run order
    pub fn all() -> [Self; 4] {
        [
            Self::AsyncMethods,
            Self::AllocPressure,
            Self::MemoryAnalysis,
            Self::StateMachine,
        ]
    }

    /// Case list for this suite
    ///
    /// `iterations_override` replaces every case's default iteration count
    /// when non-zero.
    pub fn cases(&self, iterations_override: u32) -> Vec<CaseSpec> {
        let mut cases = match self {
            Self::AsyncMethods => vec![
                CaseSpec::new("single_call", 1, 100),
                CaseSpec::new("multiple_calls", 10, 100),
                CaseSpec::new("high_concurrency", 100, 100),
            ],
            Self::AllocPressure => vec![
                CaseSpec::new("alloc_pressure", 50, 100),
                CaseSpec::new("extreme_concurrency", 1000, 50),
            ],
            Self::MemoryAnalysis => vec![
                CaseSpec::new("memory_analysis", 20, 50).sampled(),
            ],
            Self::StateMachine => {
                let mut sweep: Vec<CaseSpec> = [1usize, 10, 100, 1000]
                    .iter()
                    .map(|&k| CaseSpec::sweep("suspension_overhead", k, 50))
                    .collect();
                sweep.push(CaseSpec::new("sustained_throughput", 50, 20).batched(10));
                sweep
            }
        };

        if iterations_override > 0 {
            for case in &mut cases {
                case.iterations = iterations_override;
            }
        }

        // Every case runs once per mode
        cases
            .into_iter()
            .flat_map(|c| {
                [
                    c.with_mode(ForwardingMode::Standard),
                    c.with_mode(ForwardingMode::Optimized),
                ]
            })
            .collect()
    }
}

impl std::fmt::Display for SuiteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One benchmark case: a mode, a fan-out width, and an iteration count
#[derive(Debug, Clone)]
pub struct CaseSpec {
    /// Case name, prefixed with the mode at expansion time
    pub name: String,
    /// Forwarding mode under test
    pub mode: ForwardingMode,
    /// Concurrent invocations per batch
    pub fanout: usize,
    /// Measured iterations
    pub iterations: u32,
    /// Consecutive batches per iteration (sustained-throughput cases)
    pub batches_per_iteration: u32,
    /// Capture before/after allocation counters
    pub sample_alloc: bool,
}

impl CaseSpec {
    fn new(name: &str, fanout: usize, iterations: u32) -> Self {
        Self {
            name: name.to_string(),
            mode: ForwardingMode::Standard,
            fanout,
            iterations,
            batches_per_iteration: 1,
            sample_alloc: false,
        }
    }

    /// Sweep case; the fan-out width becomes part of the name
    fn sweep(name: &str, fanout: usize, iterations: u32) -> Self {
        Self::new(&format!("{}_k{}", name, fanout), fanout, iterations)
    }

    fn batched(mut self, batches: u32) -> Self {
        self.batches_per_iteration = batches;
        self
    }

    fn sampled(mut self) -> Self {
        self.sample_alloc = true;
        self
    }

    fn with_mode(&self, mode: ForwardingMode) -> Self {
        Self {
            name: format!("{}_{}", mode.as_str(), self.name),
            mode,
            ..self.clone()
        }
    }

    /// Total invocations this case will issue
    pub fn total_invocations(&self) -> u64 {
        self.iterations as u64 * self.batches_per_iteration as u64 * self.fanout as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suite_types() {
        assert_eq!(SuiteType::parse("async"), Some(SuiteType::AsyncMethods));
        assert_eq!(SuiteType::parse("ASYNC"), Some(SuiteType::AsyncMethods));
        assert_eq!(SuiteType::parse("gc"), Some(SuiteType::AllocPressure));
        assert_eq!(SuiteType::parse("alloc"), Some(SuiteType::AllocPressure));
        assert_eq!(SuiteType::parse("memory"), Some(SuiteType::MemoryAnalysis));
        assert_eq!(SuiteType::parse("statemachine"), Some(SuiteType::StateMachine));
        assert_eq!(SuiteType::parse("unknown"), None);
    }

    #[test]
    fn test_cases_cover_both_modes() {
        let cases = SuiteType::AsyncMethods.cases(0);
        assert_eq!(cases.len(), 6);

        let standard = cases.iter().filter(|c| c.mode == ForwardingMode::Standard);
        let optimized = cases.iter().filter(|c| c.mode == ForwardingMode::Optimized);
        assert_eq!(standard.count(), 3);
        assert_eq!(optimized.count(), 3);
    }

    #[test]
    fn test_case_names_carry_mode() {
        let cases = SuiteType::MemoryAnalysis.cases(0);
        assert_eq!(cases[0].name, "standard_memory_analysis");
        assert_eq!(cases[1].name, "optimized_memory_analysis");
        assert!(cases.iter().all(|c| c.sample_alloc));
    }

    #[test]
    fn test_statemachine_sweep_widths() {
        let cases = SuiteType::StateMachine.cases(0);
        let widths: Vec<usize> = cases
            .iter()
            .filter(|c| c.mode == ForwardingMode::Standard)
            .map(|c| c.fanout)
            .collect();
        assert_eq!(widths, vec![1, 10, 100, 1000, 50]);

        let throughput = cases
            .iter()
            .find(|c| c.name == "standard_sustained_throughput")
            .unwrap();
        assert_eq!(throughput.batches_per_iteration, 10);
        assert_eq!(throughput.total_invocations(), 20 * 10 * 50);
    }

    #[test]
    fn test_iterations_override() {
        let cases = SuiteType::AsyncMethods.cases(7);
        assert!(cases.iter().all(|c| c.iterations == 7));
    }
}
