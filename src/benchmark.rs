//! Report driver.
//!
//! [`Benchmark::run`] generates the input, runs every reducer once on it,
//! then drives every counter strategy through both harness styles, and
//! collects everything into a [`Report`]. A reducer that fails is logged
//! and recorded as failed; the run always produces a complete report.
//!
//! # Examples
//!
//! ```rust
//! use contesa::benchmark::{Benchmark, BenchmarkConfig};
//! use contesa::harness::HarnessConfig;
//!
//! let config = BenchmarkConfig::default()
//!     .with_input_len(10_000)
//!     .with_seed(42)
//!     .with_harness(HarnessConfig::new().with_actors(4).with_rounds(2));
//!
//! let report = Benchmark::new(config).run();
//! assert_eq!(report.reductions.len(), 5);
//! assert_eq!(report.contention.len(), 8);
//! assert!(report.is_consistent());
//! ```

use crate::counters::Strategy;
use crate::data;
use crate::harness::{self, HarnessConfig, Measurement, RoundStyle};
use crate::reduction::{self, Reducer};
use crate::report::{ReductionOutcome, Report};
use crate::timing;

/// Parameters of a benchmark run. Defaults are the reference scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Length of the generated input.
    pub input_len: usize,
    /// Fixed seed for the input; `None` draws from an OS-seeded generator.
    pub seed: Option<u64>,
    /// Contention harness parameters.
    pub harness: HarnessConfig,
}

impl BenchmarkConfig {
    /// Returns the reference scenario configuration.
    pub fn new() -> Self {
        Self {
            input_len: data::INPUT_LEN,
            seed: None,
            harness: HarnessConfig::default(),
        }
    }

    /// Sets the input length.
    pub fn with_input_len(mut self, input_len: usize) -> Self {
        self.input_len = input_len;
        self
    }

    /// Fixes the input seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the harness parameters.
    pub fn with_harness(mut self, harness: HarnessConfig) -> Self {
        self.harness = harness;
        self
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs reducers and counter strategies and collects a [`Report`].
#[derive(Debug)]
pub struct Benchmark {
    config: BenchmarkConfig,
    reducers: Vec<Box<dyn Reducer>>,
    strategies: Vec<Strategy>,
}

impl Benchmark {
    /// Creates a benchmark over every default reducer and every counter
    /// strategy.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            config,
            reducers: reduction::all(),
            strategies: Strategy::ALL.to_vec(),
        }
    }

    /// Replaces the reducers to run.
    pub fn with_reducers(mut self, reducers: Vec<Box<dyn Reducer>>) -> Self {
        self.reducers = reducers;
        self
    }

    /// Replaces the counter strategies to run.
    pub fn with_strategies(mut self, strategies: &[Strategy]) -> Self {
        self.strategies = strategies.to_vec();
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Generates the input collection.
    pub fn input(&self) -> Vec<i32> {
        match self.config.seed {
            Some(seed) => data::seeded(self.config.input_len, seed),
            None => data::random(self.config.input_len),
        }
    }

    /// Runs the whole benchmark.
    pub fn run(&self) -> Report {
        let input = self.input();
        tracing::info!(
            len = input.len(),
            seed = ?self.config.seed,
            "input generated"
        );

        Report {
            reductions: self.run_reductions(&input),
            contention: self.run_contention(),
        }
    }

    /// Runs every reducer once on `input`, in order.
    pub fn run_reductions(&self, input: &[i32]) -> Vec<ReductionOutcome> {
        self.reducers
            .iter()
            .map(|reducer| {
                let (sum, elapsed) = timing::timed(|| reducer.reduce(input));
                let sum = sum.map_err(|err| {
                    tracing::warn!(strategy = reducer.name(), error = %err, "reduction failed");
                    err.to_string()
                });
                tracing::info!(
                    strategy = reducer.name(),
                    elapsed_ns = elapsed.as_nanos() as u64,
                    "reduction finished"
                );
                ReductionOutcome {
                    strategy: reducer.name().to_string(),
                    description: reducer.description().to_string(),
                    elapsed,
                    sum,
                }
            })
            .collect()
    }

    /// Drives every counter strategy through both round styles, threads
    /// first, each on a fresh counter.
    pub fn run_contention(&self) -> Vec<Measurement> {
        let mut measurements = Vec::with_capacity(RoundStyle::ALL.len() * self.strategies.len());
        for style in RoundStyle::ALL {
            for strategy in &self.strategies {
                let counter = strategy.build();
                let measurement = harness::run(style, &counter, &self.config.harness);
                if !measurement.is_consistent() {
                    tracing::warn!(
                        strategy = strategy.name(),
                        %style,
                        final_value = measurement.final_value,
                        expected = measurement.expected_value(),
                        failures = measurement.failures,
                        "counter ended at an unexpected value"
                    );
                }
                tracing::info!(
                    strategy = strategy.name(),
                    %style,
                    average_ns = measurement.average().as_nanos() as u64,
                    "contention run finished"
                );
                measurements.push(measurement);
            }
        }
        measurements
    }
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new(BenchmarkConfig::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduction::{Partitioned, Sequential};

    fn small() -> BenchmarkConfig {
        BenchmarkConfig::new()
            .with_input_len(5_000)
            .with_seed(11)
            .with_harness(HarnessConfig::new().with_actors(10).with_rounds(3))
    }

    #[test]
    fn test_reference_config() {
        let config = BenchmarkConfig::new();
        assert_eq!(config.input_len, 1_000_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.harness, HarnessConfig::default());
    }

    #[test]
    fn test_seeded_input_is_stable() {
        let benchmark = Benchmark::new(small());
        assert_eq!(benchmark.input(), benchmark.input());
        assert_eq!(benchmark.input().len(), 5_000);
    }

    #[test]
    fn test_run_small() {
        let report = Benchmark::new(small()).run();

        let names: Vec<_> = report.reductions.iter().map(|r| r.strategy.as_str()).collect();
        assert_eq!(
            names,
            vec!["Sequential", "Partitioned", "DataParallel", "ForkJoinVec", "ForkJoinRange"]
        );

        assert_eq!(report.contention.len(), 8);
        assert_eq!(report.measurements(RoundStyle::Threads).count(), 4);
        for m in &report.contention {
            assert_eq!(m.final_value, 30, "{} {}", m.strategy, m.style);
            assert_eq!(m.failures, 0);
        }
        assert!(report.is_consistent());
    }

    #[test]
    fn test_failed_reducer_is_recorded() {
        let benchmark = Benchmark::new(small())
            .with_reducers(vec![Box::new(Sequential), Box::new(Partitioned::new(0))])
            .with_strategies(&[]);

        let report = benchmark.run();
        assert!(report.reductions[0].sum.is_ok());
        assert!(report.reductions[1].sum.is_err());
        assert!(report.contention.is_empty());
        assert!(!report.is_consistent());
    }

    #[test]
    fn test_selected_strategies() {
        let measurements = Benchmark::new(small())
            .with_strategies(&[Strategy::Locked])
            .run_contention();
        assert_eq!(measurements.len(), 2);
        assert!(measurements.iter().all(|m| m.strategy == "LockedCounter"));
    }
}
