//! # Contesa - Concurrency Strategy Benchmarks
//!
//! A Rust library that measures alternative strategies for two classic
//! concurrency problems and checks that each of them computes the right
//! answer:
//!
//! 1. A **shared counter** mutated concurrently by many short-lived actors.
//! 2. A **sum** over a large integer collection computed with parallel
//!    decomposition.
//!
//! ## Counter Strategies
//!
//! | Type | Synchronization | Read cost |
//! |------|-----------------|-----------|
//! | [`Striped`](counters::striped::Striped) | 64 cache-padded atomic cells, one per thread slot | sums 64 cells |
//! | [`Atomic`](counters::atomic::Atomic) | one atomic integer | one load |
//! | [`Synchronized`](counters::synchronized::Synchronized) | value lives inside a mutex | lock |
//! | [`Locked`](counters::locked::Locked) | explicit reentrant lock with bounded acquisition | lock |
//!
//! Every actor in the [`harness`] runs `increment, decrement, increment`, so
//! after `rounds x actors` completed actors every counter reads exactly that
//! product. The harness schedules actors two ways:
//!
//! - fresh OS threads per round, joined before the next round,
//! - a fresh bounded [`WorkerPool`](pool::WorkerPool) per round, shut down
//!   and awaited with a timeout.
//!
//! ## Reduction Strategies
//!
//! | Type | Decomposition |
//! |------|---------------|
//! | [`Sequential`](reduction::Sequential) | none, the oracle |
//! | [`Partitioned`](reduction::Partitioned) | fixed partitions on a worker pool |
//! | [`DataParallel`](reduction::DataParallel) | `rayon` parallel iterator |
//! | [`ForkJoinVec`](reduction::ForkJoinVec) | recursive halving over copied vectors |
//! | [`ForkJoinRange`](reduction::ForkJoinRange) | recursive halving over index ranges |
//!
//! All of them use wrapping 32-bit addition and return the same bits.
//!
//! ## Quick Start
//!
//! ```rust
//! use contesa::counters::Strategy;
//! use contesa::harness::{self, HarnessConfig, RoundStyle};
//! use contesa::reduction::{self, Reducer};
//!
//! let config = HarnessConfig::new().with_actors(10).with_rounds(1);
//! for strategy in Strategy::ALL {
//!     let counter = strategy.build();
//!     let m = harness::run(RoundStyle::Threads, &counter, &config);
//!     assert_eq!(m.final_value, 10);
//! }
//!
//! let data = [1, 2, 3, 4, 5];
//! for reducer in reduction::all() {
//!     assert_eq!(reducer.reduce(&data)?, 15);
//! }
//! # Ok::<(), contesa::Error>(())
//! ```
//!
//! ## Reports
//!
//! [`Benchmark`](benchmark::Benchmark) runs everything once and returns a
//! [`Report`](report::Report). Reports render as plain lines out of the box;
//! other renderers are gated behind feature flags:
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `table` | [`report::table`] | Render reports as ASCII tables |
//! | `serde` | [`snapshot`] | Serializable report snapshots |
//! | `json` | [`report::json`] | Serialize reports to JSON |
//! | `full` | All renderers | Enables every renderer |
//! | `cli` | `contesa` binary | Command-line driver |
//!
//! ## Logging
//!
//! The library logs through `tracing` and never installs a subscriber. Actor
//! failures and forced pool cancellations are logged at `warn`, per-run
//! results at `info` and `debug`.

pub mod benchmark;
pub mod counters;
pub mod data;
pub mod error;
pub mod harness;
pub mod pool;
pub mod reduction;
pub mod report;
pub mod timing;

#[cfg(feature = "serde")]
pub mod snapshot;

pub use error::{Error, Result};
