//! Deterministic pseudo-randomness for the recruiting tick.
//!
//! Every roll in the engine is a hash of `(seed, tick, recruit, team, subcase)`.
//! There is no RNG state to thread through the pipeline, so re-running a tick
//! from identical state produces identical output.
//!
//! ## Usage
//!
//! ```rust
//! use recruit_core::deterministic::{deterministic_f32, subcase};
//!
//! let jitter = deterministic_f32(42, 7, 1001, "State U", subcase::SCORE_JITTER, -2.0, 2.0);
//! assert!((-2.0..2.0).contains(&jitter));
//! ```

// FxHasher is stable across Rust versions; DefaultHasher is not.
use fxhash::FxHasher;
use std::hash::{Hash, Hasher};

use crate::models::RecruitId;

// ============================================================================
// Subcase Constants
// ============================================================================

/// One constant per purpose so two rolls on the same key never collide.
///
/// Ranges: geo 0x01xx, scoring 0x02xx, shortlist 0x03xx, board 0x04xx,
/// commitment 0x05xx, package 0x06xx, generation 0x07xx.
pub mod subcase {
    pub const GEO_ANGLE: u32 = 0x0100;
    pub const GEO_RADIUS: u32 = 0x0101;
    pub const GEO_REGION_BAND: u32 = 0x0102;

    pub const SCORE_JITTER: u32 = 0x0200;

    pub const SHORTLIST_TIE: u32 = 0x0300;

    pub const BOARD_JITTER: u32 = 0x0400;
    pub const BOARD_PITCH: u32 = 0x0401;

    pub const REOPEN_ROLL: u32 = 0x0500;
    pub const PENDING_DELAY: u32 = 0x0501;

    pub const PACKAGE_DISPOSITION: u32 = 0x0600;
}

/// Tick value for rolls that must not change over the cycle (e.g. a recruit's pseudo-home).
pub const STABLE_TICK: u32 = u32::MAX;

// ============================================================================
// Core Functions
// ============================================================================

/// splitmix64 finalizer; FxHasher alone leaves the low bits weakly mixed.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Raw 64-bit hash of a composite key.
#[inline]
pub fn hash_key(seed: u64, tick: u32, recruit: RecruitId, team: &str, subcase: u32) -> u64 {
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    tick.hash(&mut hasher);
    recruit.hash(&mut hasher);
    team.hash(&mut hasher);
    subcase.hash(&mut hasher);
    mix64(hasher.finish())
}

/// Uniform value in `[0, 1)`.
#[inline]
pub fn deterministic_unit(seed: u64, tick: u32, recruit: RecruitId, team: &str, subcase: u32) -> f64 {
    let hash = hash_key(seed, tick, recruit, team, subcase);
    (hash >> 11) as f64 / (1u64 << 53) as f64
}

/// Uniform value in `[min, max)`.
#[inline]
pub fn deterministic_f32(
    seed: u64,
    tick: u32,
    recruit: RecruitId,
    team: &str,
    subcase: u32,
    min: f32,
    max: f32,
) -> f32 {
    // 24 bits keep `t` exact in f32, so `t < 1.0` survives the cast.
    let t = (hash_key(seed, tick, recruit, team, subcase) >> 40) as f32 / (1u64 << 24) as f32;
    let value = min + (max - min) * t;
    if value >= max {
        min
    } else {
        value
    }
}

/// `true` with the given probability.
#[inline]
pub fn deterministic_bool(
    seed: u64,
    tick: u32,
    recruit: RecruitId,
    team: &str,
    subcase: u32,
    probability: f32,
) -> bool {
    if probability <= 0.0 {
        return false;
    }
    if probability >= 1.0 {
        return true;
    }
    (deterministic_unit(seed, tick, recruit, team, subcase) as f32) < probability
}

/// Index in `0..options_count`.
#[inline]
pub fn deterministic_choice(
    seed: u64,
    tick: u32,
    recruit: RecruitId,
    team: &str,
    subcase: u32,
    options_count: usize,
) -> usize {
    if options_count <= 1 {
        return 0;
    }
    (hash_key(seed, tick, recruit, team, subcase) % options_count as u64) as usize
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_key_stable() {
        let a = hash_key(12345, 10, 77, "North Ridge", subcase::SCORE_JITTER);
        let b = hash_key(12345, 10, 77, "North Ridge", subcase::SCORE_JITTER);
        assert_eq!(a, b, "Same inputs must produce same hash");
    }

    #[test]
    fn test_hash_key_separates_subcases() {
        let a = hash_key(12345, 10, 77, "North Ridge", subcase::SCORE_JITTER);
        let b = hash_key(12345, 10, 77, "North Ridge", subcase::SHORTLIST_TIE);
        assert_ne!(a, b);
    }

    #[test]
    fn test_f32_in_range() {
        for tick in 0..500 {
            let v = deterministic_f32(9, tick, 3, "Lakeshore", subcase::SCORE_JITTER, -2.0, 2.0);
            assert!((-2.0..2.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn test_bool_extremes() {
        assert!(!deterministic_bool(1, 1, 1, "A", subcase::REOPEN_ROLL, 0.0));
        assert!(deterministic_bool(1, 1, 1, "A", subcase::REOPEN_ROLL, 1.0));
    }

    #[test]
    fn test_choice_edge_cases() {
        assert_eq!(deterministic_choice(1, 1, 1, "A", subcase::BOARD_PITCH, 0), 0);
        assert_eq!(deterministic_choice(1, 1, 1, "A", subcase::BOARD_PITCH, 1), 0);
        for n in 2..12 {
            assert!(deterministic_choice(1, 1, 1, "A", subcase::BOARD_PITCH, n) < n);
        }
    }

    #[test]
    fn test_distribution_uniformity() {
        let mut counts = [0u32; 10];
        for tick in 0..1000 {
            let idx = deterministic_choice(42, tick, 5, "Team", subcase::BOARD_JITTER, 10);
            counts[idx] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            assert!(count > 50 && count < 150, "Bucket {} has {} (expected ~100)", i, count);
        }
    }
}
