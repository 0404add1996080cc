//! Benchmark profiles for the regio allocators.
//!
//! Provides the shared arena sizing and deterministic workload helpers
//! used by the `arena_ops` and `shared_ops` benchmarks.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use regio::{Arena, ArenaError, ConcurrentArena};

/// Capacity used by all benchmark arenas: 16MB.
pub const BENCH_CAPACITY: usize = 16 << 20;

/// Build a heap-backed single-owner arena at the benchmark capacity.
pub fn bench_arena() -> Result<Arena, ArenaError> {
    Arena::with_capacity(BENCH_CAPACITY)
}

/// Build a heap-backed concurrent arena at the benchmark capacity.
pub fn bench_shared_arena() -> Result<ConcurrentArena, ArenaError> {
    ConcurrentArena::with_capacity(BENCH_CAPACITY)
}

/// Deterministic mix of allocation sizes between 1 and 256 bytes.
pub fn size_mix(seed: u64, count: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.random_range(1..=256)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mix_is_deterministic() {
        assert_eq!(size_mix(42, 100), size_mix(42, 100));
    }

    #[test]
    fn size_mix_stays_in_range() {
        assert!(size_mix(7, 1000).iter().all(|&s| (1..=256).contains(&s)));
    }
}
