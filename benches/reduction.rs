use contesa::data;
use contesa::reduction::{self, Reducer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SEED: u64 = 0x5eed;

fn bench_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduction");
    let input = data::seeded(data::INPUT_LEN, SEED);

    for reducer in reduction::all() {
        group.bench_function(
            BenchmarkId::new(reducer.name(), format!("{}elems", input.len())),
            |b| b.iter(|| black_box(reducer.reduce(black_box(&input)).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reduction);
criterion_main!(benches);
