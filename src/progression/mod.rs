//! Progression domain: level catalog, active dungeon, and dungeon transitions.

mod catalog;
mod controller;
mod events;
mod fade;
mod spawn;
mod systems;
mod transition;

#[cfg(test)]
mod tests;

pub use catalog::{DungeonCursor, Level, LevelCatalog};
pub use controller::{ActiveDungeon, DungeonPlan, LevelProgression, RoomSummary};
pub use events::{DungeonChangedEvent, PortalActivatedEvent};
pub use fade::{FadeOverlay, ScreenFade};
pub use spawn::{DungeonRoot, Stairs, spawn_dungeon};
pub use transition::{TransitionHost, TransitionOutcome, TransitionPhase, TransitionSequencer};

use bevy::prelude::*;

use crate::core::GameState;
use crate::player::spawn_player;
use crate::progression::fade::{spawn_fade_overlay, update_screen_fade};
use crate::progression::systems::{
    detect_portal, lock_room_on_entry, run_transition, start_first_dungeon,
};
use crate::rooms::detect_room_entry;

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelProgression>()
            .init_resource::<TransitionSequencer>()
            .init_resource::<ScreenFade>()
            .add_message::<PortalActivatedEvent>()
            .add_message::<DungeonChangedEvent>()
            .add_systems(Startup, spawn_fade_overlay)
            .add_systems(
                OnEnter(GameState::Run),
                start_first_dungeon.after(spawn_player),
            )
            .add_systems(Update, update_screen_fade)
            .add_systems(
                Update,
                (lock_room_on_entry, detect_portal, run_transition)
                    .chain()
                    .after(detect_room_entry)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
