//! Deterministic simulation-level RNG wrapper.
//!
//! Randomness in the core is limited to world setup: spawn jitter around a
//! depot or barrack and resource cluster placement.  Agent decisions are
//! fully deterministic, so one seeded `SimRng` is enough; per-subsystem
//! streams are derived with [`SimRng::child`] so adding a new consumer does
//! not shift the draws of existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG for world setup and spawning.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` for an independent subsystem stream.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform sample in `[-half_extent, half_extent]`; `0.0` when the extent
    /// is not positive.
    #[inline]
    pub fn spread(&mut self, half_extent: f32) -> f32 {
        if half_extent > 0.0 {
            self.0.gen_range(-half_extent..=half_extent)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
