//! Debug domain: hotkeys for forcing room and dungeon progress, plus tile gizmos.

use bevy::prelude::*;

use crate::content::DungeonSettings;
use crate::debug::DebugState;
use crate::progression::{LevelProgression, PortalActivatedEvent, TransitionSequencer};
use crate::rooms::{Room, RoomFinishedEvent};

/// Ctrl+F finish current room, Ctrl+N take the stairs, Ctrl+G tile gizmos,
/// Ctrl+X cancel a pending transition.
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    progression: Res<LevelProgression>,
    mut debug_state: ResMut<DebugState>,
    mut sequencer: ResMut<TransitionSequencer>,
    mut finished_events: MessageWriter<RoomFinishedEvent>,
    mut portal_events: MessageWriter<PortalActivatedEvent>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyF) {
        match progression.current_room() {
            Some(room) => {
                info!("[DEBUG] Finishing current room");
                finished_events.write(RoomFinishedEvent { room });
            }
            None => info!("[DEBUG] No current room to finish"),
        }
    }

    if keyboard.just_pressed(KeyCode::KeyN) {
        info!("[DEBUG] Forcing portal activation");
        portal_events.write(PortalActivatedEvent);
    }

    if keyboard.just_pressed(KeyCode::KeyG) {
        debug_state.show_tiles = !debug_state.show_tiles;
        info!("[DEBUG] Tile gizmos: {}", debug_state.show_tiles);
    }

    if keyboard.just_pressed(KeyCode::KeyX) {
        if sequencer.cancel() {
            info!("[DEBUG] Transition cancel requested");
        } else {
            info!("[DEBUG] No transition to cancel");
        }
    }
}

pub(crate) fn draw_tile_gizmos(
    mut gizmos: Gizmos,
    settings: Res<DungeonSettings>,
    room_query: Query<&Room>,
) {
    let size = Vec2::splat(settings.tiles.cell_size * 0.8);
    for room in &room_query {
        for slot in room.tiles().iter() {
            let color = if slot.available {
                Color::srgb(0.2, 0.9, 0.3)
            } else {
                Color::srgb(0.9, 0.2, 0.2)
            };
            gizmos.rect_2d(
                Isometry2d::from_translation(slot.position.truncate()),
                size,
                color,
            );
        }
    }
}
