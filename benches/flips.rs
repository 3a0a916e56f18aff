//! Benchmarks for the flip counter.
//!
//! - `fannkuch`: full enumeration for a few orders
//! - `count_flips`: a single worst-case permutation
//! - `traced`: cost of block coverage against the untraced path

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pfannkuchen::trace::Coverage;
use pfannkuchen::{Permutations, count_flips, fannkuch, fannkuch_traced};

fn bench_fannkuch(c: &mut Criterion) {
    let mut group = c.benchmark_group("fannkuch");
    for n in [7, 8, 9] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| fannkuch(black_box(n)))
        });
    }
    group.finish();
}

fn bench_count_flips(c: &mut Criterion) {
    // Permutation of order 9 that needs the maximum of 30 flips
    let worst = Permutations::new(9)
        .max_by_key(|perm| count_flips(&mut perm.clone()))
        .unwrap_or_default();

    c.bench_function("count_flips_worst_n9", |b| {
        b.iter(|| {
            let mut perm = worst.clone();
            count_flips(black_box(&mut perm))
        })
    });
}

fn bench_traced(c: &mut Criterion) {
    let mut group = c.benchmark_group("traced");
    group.bench_function("untraced_n8", |b| b.iter(|| fannkuch(black_box(8))));
    group.bench_function("coverage_n8", |b| {
        b.iter(|| {
            let mut coverage = Coverage::new();
            fannkuch_traced(black_box(8), &mut coverage)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_fannkuch, bench_count_flips, bench_traced);
criterion_main!(benches);
