//! Core domain: shared resources for run configuration and randomness.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Deterministic random source for everything that shapes a dungeon.
/// Seeded once per run so a fixed seed reproduces the same decoration.
#[derive(Resource, Debug)]
pub struct DungeonRng(pub ChaCha8Rng);

impl DungeonRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for DungeonRng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}
