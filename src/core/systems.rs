//! Core domain: run setup systems.

use bevy::prelude::*;

use crate::content::DungeonSettings;
use crate::core::resources::{DungeonRng, RunConfig};

/// Pick the run seed (settings override, otherwise random) and reseed the dungeon RNG.
pub(crate) fn initialize_run(
    settings: Option<Res<DungeonSettings>>,
    mut run_config: ResMut<RunConfig>,
    mut rng: ResMut<DungeonRng>,
) {
    if let Some(seed) = settings.and_then(|s| s.seed) {
        run_config.seed = seed;
    }
    *rng = DungeonRng::from_seed(run_config.seed);

    info!("Starting new run with seed: {}", run_config.seed);
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
