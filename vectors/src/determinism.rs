//! Seed scoping for reproducible suite generation.
//!
//! A generator's random stream is saved, reseeded for the duration of one
//! suite, and restored afterwards. The restore runs from a drop guard, so it
//! also happens when generation returns an error or unwinds.

use std::ops::{Deref, DerefMut};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The random source threaded through all generation.
pub type SuiteRng = ChaCha8Rng;

/// Creates a fresh random source from a seed.
#[must_use]
pub fn seeded_rng(seed: u64) -> SuiteRng {
    SuiteRng::seed_from_u64(seed)
}

/// Reseeded view of a random source that restores the prior state on drop.
#[derive(Debug)]
pub struct SeedGuard<'a> {
    rng: &'a mut SuiteRng,
    saved: SuiteRng,
}

impl<'a> SeedGuard<'a> {
    /// Saves `rng`, then reseeds it with `seed`.
    pub fn reseed(rng: &'a mut SuiteRng, seed: u64) -> Self {
        let saved = std::mem::replace(rng, seeded_rng(seed));
        Self { rng, saved }
    }
}

impl Deref for SeedGuard<'_> {
    type Target = SuiteRng;

    fn deref(&self) -> &SuiteRng {
        self.rng
    }
}

impl DerefMut for SeedGuard<'_> {
    fn deref_mut(&mut self) -> &mut SuiteRng {
        self.rng
    }
}

impl Drop for SeedGuard<'_> {
    fn drop(&mut self) {
        std::mem::swap(self.rng, &mut self.saved);
    }
}

/// Runs `f` with `rng` reseeded to `seed`, restoring its state afterwards.
pub fn with_seed<T>(rng: &mut SuiteRng, seed: u64, f: impl FnOnce(&mut SuiteRng) -> T) -> T {
    let mut guard = SeedGuard::reseed(rng, seed);
    f(&mut *guard)
}
