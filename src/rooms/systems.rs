//! Rooms domain: entry detection, completion, and door presentation systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::player::Player;
use crate::rooms::components::{DoorVisual, Prop, Treasure};
use crate::rooms::controller::Room;
use crate::rooms::events::{PlayerEnteredRoomEvent, RoomFinishedEvent};
use crate::rooms::spawn::door_layers;

/// Turns the player touching a room sensor into a room entry.
pub(crate) fn detect_room_entry(
    mut collision_start_events: MessageReader<CollisionStart>,
    player_query: Query<Entity, With<Player>>,
    room_query: Query<&Room>,
    mut entered_events: MessageWriter<PlayerEnteredRoomEvent>,
) {
    let Some(player_entity) = player_query.iter().next() else {
        // Consume events if no player
        for _ in collision_start_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let (room_entity, other) = if room_query.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if room_query.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        if other != player_entity {
            continue;
        }

        let Ok(room) = room_query.get(room_entity) else {
            continue;
        };
        // State only changes once the consumer accepts the entry.
        if room.awaits_entry() {
            info!("[ROOM] Player entered room '{}'", room.id);
            entered_events.write(PlayerEnteredRoomEvent {
                room: room_entity,
                room_id: room.id.clone(),
            });
        }
    }
}

pub(crate) fn apply_room_finished(
    mut finished_events: MessageReader<RoomFinishedEvent>,
    mut room_query: Query<&mut Room>,
) {
    for event in finished_events.read() {
        let Ok(mut room) = room_query.get_mut(event.room) else {
            warn!("[ROOM] Finish requested for missing room {:?}", event.room);
            continue;
        };
        if room.finish() {
            info!(
                "[DOORS] Room '{}' finished, opening {} doors",
                room.id,
                room.doors().len()
            );
        } else {
            debug!("[ROOM] Room '{}' cannot be finished", room.id);
        }
    }
}

/// Keeps door tint and blocking collider in step with the owning room's door set.
pub(crate) fn sync_door_visuals(
    mut commands: Commands,
    room_query: Query<Ref<Room>>,
    mut door_query: Query<(Entity, &mut DoorVisual, &ChildOf, &mut Sprite)>,
) {
    for (entity, mut visual, child_of, mut sprite) in &mut door_query {
        let Ok(room) = room_query.get(child_of.parent()) else {
            continue;
        };
        if !room.is_changed() {
            continue;
        }
        let Some(door) = room.doors().get(visual.index) else {
            continue;
        };

        sprite.color = door.tint();
        let should_block = !door.is_open();
        if should_block && !visual.blocking {
            let size = door.size();
            commands.entity(entity).insert((
                RigidBody::Static,
                Collider::rectangle(size.x, size.y),
                door_layers(),
            ));
        } else if !should_block && visual.blocking {
            commands
                .entity(entity)
                .remove::<(RigidBody, Collider, CollisionLayers)>();
        }
        visual.blocking = should_block;
    }
}

const OPENED_TREASURE_TINT: Color = Color::srgb(0.35, 0.3, 0.2);

/// Opens a treasure the first time the player touches it.
pub(crate) fn open_treasure(
    mut collision_start_events: MessageReader<CollisionStart>,
    player_query: Query<Entity, With<Player>>,
    mut treasure_query: Query<(&mut Treasure, &Prop, &mut Sprite)>,
) {
    let Some(player_entity) = player_query.iter().next() else {
        // Consume events if no player
        for _ in collision_start_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let (treasure_entity, other) = if treasure_query.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if treasure_query.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };
        if other != player_entity {
            continue;
        }

        let Ok((mut treasure, prop, mut sprite)) = treasure_query.get_mut(treasure_entity) else {
            continue;
        };
        if treasure.open() {
            sprite.color = OPENED_TREASURE_TINT;
            info!("[ROOM] Opened {:?} '{}'", prop.kind, prop.name);
        }
    }
}
