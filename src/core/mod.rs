//! Core domain: run states, seeding, shared errors, and camera setup.

mod error;
mod resources;
mod state;
mod systems;

pub use error::DungeonError;
pub use resources::{DungeonRng, RunConfig};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{initialize_run, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunConfig>()
            .init_resource::<DungeonRng>()
            .add_systems(Startup, (setup_camera, initialize_run));
    }
}
