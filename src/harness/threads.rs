//! Raw-thread rounds: fresh OS threads per round, full join barrier.

use std::sync::Arc;
use std::thread;

use crate::counters::Counter;
use crate::harness::{finish, micro_sequence, HarnessConfig, Measurement, RoundStyle};
use crate::pool::panic_message;
use crate::timing::ElapsedAccumulator;

/// Runs `config.rounds` rounds, each spawning `config.actors` fresh threads.
///
/// No thread outlives its round: every thread of round `k` is joined before
/// round `k + 1` spawns anything. A thread that cannot be spawned, or whose
/// join reports a panic, is logged and counted as a failure; the round
/// carries on with the remaining actors.
pub fn run_threads<C>(counter: &Arc<C>, config: &HarnessConfig) -> Measurement
where
    C: Counter + ?Sized + 'static,
{
    let elapsed = Arc::new(ElapsedAccumulator::new());
    let mut failures = 0;

    for round in 0..config.rounds {
        let mut handles = Vec::with_capacity(config.actors);

        for _ in 0..config.actors {
            let counter = Arc::clone(counter);
            let elapsed = Arc::clone(&elapsed);
            match thread::Builder::new().spawn(move || micro_sequence(&*counter, &elapsed)) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    failures += 1;
                    tracing::warn!(round, error = %err, "failed to spawn actor thread");
                }
            }
        }

        for handle in handles {
            if let Err(payload) = handle.join() {
                failures += 1;
                tracing::warn!(
                    round,
                    panic = %panic_message(payload.as_ref()),
                    "actor thread panicked"
                );
            }
        }

        tracing::trace!(round, "raw-thread round complete");
    }

    finish(&**counter, RoundStyle::Threads, config, &elapsed, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::Strategy;

    /// A counter that refuses to be incremented.
    #[derive(Debug)]
    struct Broken;

    impl Counter for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn increment(&self) {
            panic!("increment refused");
        }

        fn decrement(&self) {}

        fn read(&self) -> i64 {
            0
        }
    }

    #[test]
    fn test_every_strategy_small_run() {
        let config = HarnessConfig::new().with_actors(50).with_rounds(4);
        for strategy in Strategy::ALL {
            let counter = strategy.build();
            let measurement = run_threads(&counter, &config);
            assert_eq!(measurement.style, RoundStyle::Threads);
            assert_eq!(measurement.final_value, 200, "{strategy}");
            assert_eq!(measurement.strategy, strategy.name());
            assert!(measurement.is_consistent());
        }
    }

    #[test]
    fn test_ten_actors_one_round() {
        let config = HarnessConfig::new().with_actors(10).with_rounds(1);
        for strategy in Strategy::ALL {
            let counter = strategy.build();
            assert_eq!(run_threads(&counter, &config).final_value, 10);
        }
    }

    #[test]
    fn test_panicking_actors_are_counted() {
        let config = HarnessConfig::new().with_actors(5).with_rounds(2);
        let counter = Arc::new(Broken);
        let measurement = run_threads(&counter, &config);
        assert_eq!(measurement.failures, 10);
        assert_eq!(measurement.total, std::time::Duration::ZERO);
    }
}
