//! Bootstrap resampling of keyed series.
//!
//! ## Purpose
//!
//! This module draws nonparametric bootstrap samples of (key, value) rows
//! and derives the per-replicate random generators used by the engine.
//!
//! ## Design notes
//!
//! * **Re-sorting**: Drawn rows are put back in key order before they are
//!   returned, because the fit penalty acts on key adjacency, not draw order.
//!   Source keys are strictly increasing, so ordering the drawn row indices
//!   orders the keys, and equal keys are always identical rows.
//! * **Counter seeding**: Replicate `r` uses its own `Xoshiro256PlusPlus`
//!   seeded from `(base_seed, r)`, so any execution order (sequential or
//!   parallel) sees the same draws.
//!
//! ## Invariants
//!
//! * The sample has the same length as the input.
//! * Sample keys are non-decreasing; duplicate rows are kept.
//! * Same generator state and input give the same sample.

// External dependencies
use num_traits::Float;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

// Internal dependencies
use crate::primitives::series::Series;

/// Draw a bootstrap sample of `series` with replacement, in key order.
pub fn resample<T: Float, R: Rng + ?Sized>(series: &Series<T>, rng: &mut R) -> Series<T> {
    let m = series.len();
    let mut rows: Vec<usize> = (0..m).map(|_| rng.gen_range(0..m)).collect();
    rows.sort_unstable();

    let keys = rows.iter().map(|&i| series.keys()[i]).collect();
    let values = rows.iter().map(|&i| series.values()[i]).collect();
    Series::from_sorted_rows(keys, values)
}

/// SplitMix64 mix of a base seed and a replicate counter.
#[inline]
pub fn counter_seed(base: u64, counter: u64) -> u64 {
    let mut z = base
        .wrapping_add(counter.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Generator for replicate `replicate` of a run seeded with `base`.
#[inline]
pub fn replicate_rng(base: u64, replicate: usize) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(counter_seed(base, replicate as u64))
}
