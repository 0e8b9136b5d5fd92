//! Pooled rounds: a fresh bounded worker pool per round, drained before the
//! next round starts.

use std::sync::Arc;

use crate::counters::Counter;
use crate::harness::{finish, micro_sequence, HarnessConfig, Measurement, RoundStyle};
use crate::pool::WorkerPool;
use crate::timing::ElapsedAccumulator;

/// Runs `config.rounds` rounds, each on a fresh pool of `config.pool_size`
/// workers.
///
/// Per round: submit `config.actors` micro-sequence tasks, shut the pool
/// down, wait up to `config.await_timeout` for it to terminate and force
/// cancellation of whatever has not started if it does not. Every task
/// handle is then joined; panicked and cancelled tasks are logged and
/// counted, never propagated.
pub fn run_pooled<C>(counter: &Arc<C>, config: &HarnessConfig) -> Measurement
where
    C: Counter + ?Sized + 'static,
{
    let elapsed = Arc::new(ElapsedAccumulator::new());
    let mut failures = 0;

    for round in 0..config.rounds {
        failures += pooled_round(round, counter, &elapsed, config);
    }

    finish(&**counter, RoundStyle::Pooled, config, &elapsed, failures)
}

/// Runs one round and returns how many actors failed.
fn pooled_round<C>(
    round: u32,
    counter: &Arc<C>,
    elapsed: &Arc<ElapsedAccumulator>,
    config: &HarnessConfig,
) -> usize
where
    C: Counter + ?Sized + 'static,
{
    let pool = match WorkerPool::new(config.pool_size) {
        Ok(pool) => pool,
        Err(err) => {
            tracing::warn!(round, error = %err, "could not start worker pool, round skipped");
            return config.actors;
        }
    };

    let mut failures = 0;
    let mut handles = Vec::with_capacity(config.actors);
    for _ in 0..config.actors {
        let counter = Arc::clone(counter);
        let elapsed = Arc::clone(elapsed);
        match pool.submit(move || micro_sequence(&*counter, &elapsed)) {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                failures += 1;
                tracing::warn!(round, error = %err, "failed to submit actor");
            }
        }
    }

    pool.shutdown();
    if !pool.await_termination(config.await_timeout) {
        tracing::warn!(
            round,
            timeout_ms = config.await_timeout.as_millis() as u64,
            "pool did not terminate in time, cancelling outstanding tasks"
        );
        pool.shutdown_now();
    }

    for handle in handles {
        if let Err(err) = handle.join() {
            failures += 1;
            tracing::warn!(round, error = %err, "pooled actor failed");
        }
    }

    tracing::trace!(round, failures, "pooled round complete");
    failures
}
