use std::sync::Arc;
use std::thread;

use contesa::counters::{Counter, Strategy};
use contesa::harness::{self, HarnessConfig, RoundStyle};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const NUM_THREADS: usize = 8;
const ITERATIONS_PER_THREAD: usize = 100_000;

fn bench_counter_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter_increment");

    for strategy in Strategy::ALL {
        group.bench_function(
            BenchmarkId::new(
                strategy.name(),
                format!("{}threads x {}iter", NUM_THREADS, ITERATIONS_PER_THREAD),
            ),
            |b| {
                b.iter(|| {
                    let counter: Arc<dyn Counter> = strategy.build();
                    let mut handles = vec![];

                    for _ in 0..NUM_THREADS {
                        let counter_clone = Arc::clone(&counter);
                        let handle = thread::spawn(move || {
                            for _ in 0..ITERATIONS_PER_THREAD {
                                counter_clone.increment();
                            }
                        });
                        handles.push(handle);
                    }

                    for handle in handles {
                        handle.join().unwrap();
                    }

                    black_box(counter.read())
                })
            },
        );
    }

    group.finish();
}

fn bench_harness_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("harness_round");
    group.sample_size(10);

    let config = HarnessConfig::new().with_rounds(1);

    for style in RoundStyle::ALL {
        for strategy in Strategy::ALL {
            group.bench_function(BenchmarkId::new(strategy.name(), style), |b| {
                b.iter(|| {
                    let counter = strategy.build();
                    black_box(harness::run(style, &counter, &config).final_value)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_counter_increment, bench_harness_round);
criterion_main!(benches);
