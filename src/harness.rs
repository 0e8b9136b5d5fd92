//! Contention harness driving many concurrent actors against one counter.
//!
//! Every actor runs the same micro-sequence against the shared counter:
//!
//! ```text
//!   start = now
//!   increment; decrement; increment
//!   accumulator += now - start
//! ```
//!
//! so each actor nets `+1`. A run is `rounds` rounds of `actors` actors, and
//! the reported latency is the accumulated actor time divided by the number
//! of rounds.
//!
//! Two scheduling styles are provided:
//!
//! - [`threads::run_threads`] spawns fresh OS threads every round and joins
//!   all of them before the next round starts.
//! - [`pooled::run_pooled`] submits the round to a fresh bounded
//!   [`WorkerPool`](crate::pool::WorkerPool), shuts it down and waits for it
//!   with a timeout, forcing cancellation if the timeout elapses.
//!
//! Neither style lets an actor failure escape: failures are logged and
//! counted in [`Measurement::failures`], and the run continues.
//!
//! # Examples
//!
//! ```rust
//! use contesa::counters::Strategy;
//! use contesa::harness::{self, HarnessConfig, RoundStyle};
//!
//! let config = HarnessConfig::new().with_actors(8).with_rounds(3);
//! let counter = Strategy::Atomic.build();
//!
//! let measurement = harness::run(RoundStyle::Pooled, &counter, &config);
//! assert_eq!(measurement.final_value, 8 * 3);
//! assert_eq!(measurement.failures, 0);
//! ```

pub mod pooled;
pub mod threads;

use std::fmt::Display;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::counters::Counter;
use crate::timing::{self, ElapsedAccumulator};

pub use pooled::run_pooled;
pub use threads::run_threads;

/// Number of concurrent actors per round in the reference scenario.
pub const DEFAULT_ACTORS: usize = 1_000;

/// Number of rounds in the reference scenario.
pub const DEFAULT_ROUNDS: u32 = 100;

/// Worker count of the pooled round.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// How long the pooled round waits for its pool before forcing cancellation.
pub const DEFAULT_AWAIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Parameters of a harness run. Defaults are the reference scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Actors started per round.
    pub actors: usize,
    /// Number of rounds.
    pub rounds: u32,
    /// Worker threads in the pooled style.
    pub pool_size: usize,
    /// Bounded wait for pool termination in the pooled style.
    pub await_timeout: Duration,
}

impl HarnessConfig {
    /// Returns the reference scenario configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of actors per round.
    pub fn with_actors(mut self, actors: usize) -> Self {
        self.actors = actors;
        self
    }

    /// Sets the number of rounds.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the pool size used by the pooled style.
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the termination timeout used by the pooled style.
    pub fn with_await_timeout(mut self, timeout: Duration) -> Self {
        self.await_timeout = timeout;
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            actors: DEFAULT_ACTORS,
            rounds: DEFAULT_ROUNDS,
            pool_size: DEFAULT_POOL_SIZE,
            await_timeout: DEFAULT_AWAIT_TIMEOUT,
        }
    }
}

/// How actors are scheduled in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundStyle {
    /// Fresh OS threads per round, joined at the round barrier.
    Threads,
    /// A fresh bounded worker pool per round, drained before the next one.
    Pooled,
}

impl RoundStyle {
    /// Both styles, in report order.
    pub const ALL: [RoundStyle; 2] = [RoundStyle::Threads, RoundStyle::Pooled];

    /// Returns a human-readable description used as a report heading.
    pub const fn title(self) -> &'static str {
        match self {
            RoundStyle::Threads => "fresh threads per round",
            RoundStyle::Pooled => "bounded worker pool per round",
        }
    }
}

impl Display for RoundStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundStyle::Threads => f.write_str("threads"),
            RoundStyle::Pooled => f.write_str("pooled"),
        }
    }
}

/// Result of one harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Name of the counter under test.
    pub strategy: String,
    /// Scheduling style used.
    pub style: RoundStyle,
    /// Number of rounds run.
    pub rounds: u32,
    /// Actors started per round.
    pub actors: usize,
    /// Sum of every actor's micro-sequence duration.
    pub total: Duration,
    /// Actors that failed to spawn, panicked, or were cancelled.
    pub failures: usize,
    /// Counter value read after the last round.
    pub final_value: i64,
}

impl Measurement {
    /// Accumulated actor time divided by the number of rounds.
    pub fn average(&self) -> Duration {
        timing::average(self.total, self.rounds)
    }

    /// Value the counter must hold if every actor completed.
    pub fn expected_value(&self) -> i64 {
        self.actors as i64 * i64::from(self.rounds)
    }

    /// Returns `true` when the final value matches the completed actors.
    pub fn is_consistent(&self) -> bool {
        self.final_value == self.expected_value() - self.failures as i64
    }
}

/// Runs the harness in the given style.
pub fn run<C>(style: RoundStyle, counter: &Arc<C>, config: &HarnessConfig) -> Measurement
where
    C: Counter + ?Sized + 'static,
{
    match style {
        RoundStyle::Threads => run_threads(counter, config),
        RoundStyle::Pooled => run_pooled(counter, config),
    }
}

/// One actor's work: increment, decrement, increment, then record the time
/// it took into the shared accumulator.
#[inline]
pub fn micro_sequence<C>(counter: &C, elapsed: &ElapsedAccumulator)
where
    C: Counter + ?Sized,
{
    let start = Instant::now();
    counter.increment();
    counter.decrement();
    counter.increment();
    elapsed.add(start.elapsed());
}

/// Builds the measurement once every round has completed.
fn finish<C>(
    counter: &C,
    style: RoundStyle,
    config: &HarnessConfig,
    elapsed: &ElapsedAccumulator,
    failures: usize,
) -> Measurement
where
    C: Counter + ?Sized,
{
    let measurement = Measurement {
        strategy: counter.name().to_string(),
        style,
        rounds: config.rounds,
        actors: config.actors,
        total: elapsed.total(),
        failures,
        final_value: counter.read(),
    };
    tracing::debug!(
        strategy = %measurement.strategy,
        %style,
        average_ns = measurement.average().as_nanos() as u64,
        failures,
        final_value = measurement.final_value,
        "harness run finished"
    );
    measurement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::Strategy;

    #[test]
    fn test_default_is_reference_scenario() {
        let config = HarnessConfig::default();
        assert_eq!(config.actors, 1_000);
        assert_eq!(config.rounds, 100);
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.await_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_micro_sequence_nets_one() {
        let counter = Strategy::Striped.build();
        let elapsed = ElapsedAccumulator::new();
        micro_sequence(&*counter, &elapsed);
        assert_eq!(counter.read(), 1);
    }

    #[test]
    fn test_measurement_average() {
        let measurement = Measurement {
            strategy: "x".to_string(),
            style: RoundStyle::Threads,
            rounds: 4,
            actors: 2,
            total: Duration::from_nanos(400),
            failures: 0,
            final_value: 8,
        };
        assert_eq!(measurement.average(), Duration::from_nanos(100));
        assert_eq!(measurement.expected_value(), 8);
        assert!(measurement.is_consistent());
    }

    #[test]
    fn test_single_actor_single_round() {
        let config = HarnessConfig::new().with_actors(1).with_rounds(1);
        for style in RoundStyle::ALL {
            for strategy in Strategy::ALL {
                let counter = strategy.build();
                let measurement = run(style, &counter, &config);
                assert_eq!(measurement.final_value, 1, "{strategy} {style}");
                assert_eq!(measurement.failures, 0);
            }
        }
    }

    #[test]
    fn test_zero_rounds() {
        let config = HarnessConfig::new().with_rounds(0);
        for style in RoundStyle::ALL {
            let counter = Strategy::Atomic.build();
            let measurement = run(style, &counter, &config);
            assert_eq!(measurement.final_value, 0);
            assert_eq!(measurement.average(), Duration::ZERO);
        }
    }
}
