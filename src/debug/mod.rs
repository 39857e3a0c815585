//! Debug mode for fast iteration on dungeon content.
//!
//! Features:
//! - Finish the current room without solving it
//! - Force the stairs and cancel a pending transition
//! - Show tile slot availability per room

mod state;
mod systems;

pub use state::DebugState;

use bevy::prelude::*;

use crate::core::GameState;
use crate::debug::systems::{draw_tile_gizmos, handle_debug_hotkeys};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                handle_debug_hotkeys.run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                draw_tile_gizmos.run_if(|state: Res<DebugState>| state.show_tiles),
            );
    }
}
