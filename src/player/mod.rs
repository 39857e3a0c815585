//! Player domain: the top-down explorer that walks through dungeon rooms.

mod components;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{GameLayer, MovementInput, MovementTuning, Player};

pub(crate) use systems::spawn_player;

use bevy::prelude::*;

use crate::core::GameState;
use crate::player::systems::{apply_movement, follow_player, read_input};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(OnEnter(GameState::Run), spawn_player)
            .add_systems(
                Update,
                (read_input, apply_movement, follow_player)
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
