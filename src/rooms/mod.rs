//! Rooms domain: room building, template decoding, doors, and entry/finish flow.

mod components;
mod controller;
mod decoder;
mod doors;
mod events;
mod spawn;
mod systems;


pub use components::{DoorVisual, Prop, PuzzleSettings, Treasure};
pub use controller::{Room, RoomBuild, RoomContext, RoomState, build_room, grid_origin};
pub use decoder::{Decoration, Placement, decode_template, decorate, pick_template};
pub use doors::{Door, DoorSet, DoorState};
pub use events::{PlayerEnteredRoomEvent, RoomFinishedEvent};
pub use spawn::spawn_room;
pub(crate) use systems::detect_room_entry;

use bevy::prelude::*;

use crate::core::GameState;
use crate::rooms::systems::{apply_room_finished, open_treasure, sync_door_visuals};

pub struct RoomsPlugin;

impl Plugin for RoomsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayerEnteredRoomEvent>()
            .add_message::<RoomFinishedEvent>()
            .add_systems(
                Update,
                (
                    detect_room_entry,
                    apply_room_finished,
                    sync_door_visuals,
                    open_treasure,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
