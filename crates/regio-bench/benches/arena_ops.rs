//! Criterion micro-benchmarks for single-owner arena operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regio_bench::{bench_arena, size_mix};

/// Benchmark: 1000 fixed-size allocations per reset cycle.
fn bench_bump_fixed(c: &mut Criterion) {
    let mut arena = bench_arena().unwrap();

    c.bench_function("bump_fixed_64x1000", |b| {
        b.iter(|| {
            arena.reset();
            for _ in 0..1000 {
                let region = arena.alloc(64).unwrap();
                black_box(region.offset());
            }
        });
    });
}

/// Benchmark: 1000 mixed-size allocations per reset cycle.
fn bench_bump_mixed(c: &mut Criterion) {
    let mut arena = bench_arena().unwrap();
    let sizes = size_mix(42, 1000);

    c.bench_function("bump_mixed_1000", |b| {
        b.iter(|| {
            arena.reset();
            for &size in &sizes {
                let region = arena.alloc(size).unwrap();
                black_box(region.offset());
            }
        });
    });
}

/// Benchmark: checkpoint scope per iteration — allocate, touch, rewind.
fn bench_scope_cycle(c: &mut Criterion) {
    let mut arena = bench_arena().unwrap();
    arena.alloc(1024).unwrap();

    c.bench_function("scope_restore_cycle", |b| {
        b.iter(|| {
            let mut scope = arena.scoped_restore();
            for _ in 0..100 {
                let region = scope.alloc(128).unwrap();
                scope.bytes_mut(region)[0] = 1;
            }
            black_box(scope.used());
        });
    });
}

criterion_group!(
    benches,
    bench_bump_fixed,
    bench_bump_mixed,
    bench_scope_cycle
);
criterion_main!(benches);
