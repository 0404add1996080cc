//! Criterion micro-benchmarks for the mutex-guarded arena.

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regio::ConcurrentArena;
use regio_bench::bench_shared_arena;

/// Benchmark: uncontended allocation through the mutex, to compare
/// against the single-owner arena's cost in `arena_ops`.
fn bench_shared_alloc(c: &mut Criterion) {
    let arena = Arc::new(bench_shared_arena().unwrap());

    c.bench_function("shared_alloc_64x1000", |b| {
        b.iter(|| {
            let handle = ConcurrentArena::acquire(&arena);
            for _ in 0..1000 {
                let region = handle.arena().alloc(64).unwrap();
                black_box(region.offset());
            }
            drop(handle);
        });
    });
}

/// Benchmark: acquire/release round trip, the cost of a reset cycle.
fn bench_reference_cycle(c: &mut Criterion) {
    let arena = Arc::new(bench_shared_arena().unwrap());

    c.bench_function("reference_acquire_release", |b| {
        b.iter(|| {
            let handle = ConcurrentArena::acquire(&arena);
            black_box(handle.arena().ref_count());
            drop(handle);
        });
    });
}

/// Benchmark: four threads allocating under contention.
fn bench_contended_alloc(c: &mut Criterion) {
    c.bench_function("shared_alloc_contended_4x250", |b| {
        b.iter(|| {
            let arena = Arc::new(bench_shared_arena().unwrap());
            let threads: Vec<_> = (0..4)
                .map(|_| {
                    let arena = Arc::clone(&arena);
                    thread::spawn(move || {
                        let handle = ConcurrentArena::acquire(&arena);
                        for _ in 0..250 {
                            black_box(handle.arena().alloc(64).unwrap());
                        }
                        drop(handle);
                    })
                })
                .collect();
            for t in threads {
                t.join().unwrap();
            }
        });
    });
}

criterion_group!(
    benches,
    bench_shared_alloc,
    bench_reference_cycle,
    bench_contended_alloc
);
criterion_main!(benches);
