//! Rooms domain: spawning built rooms, their props, and their door visuals.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::RoomType;
use crate::player::GameLayer;
use crate::rooms::components::{DoorVisual, Prop, Treasure};
use crate::rooms::controller::RoomBuild;

fn floor_color(room_type: RoomType) -> Color {
    match room_type {
        RoomType::Free => Color::srgb(0.22, 0.22, 0.26),
        RoomType::Entrance => Color::srgb(0.2, 0.3, 0.24),
        RoomType::Puzzle => Color::srgb(0.22, 0.24, 0.34),
        RoomType::Enemy => Color::srgb(0.32, 0.22, 0.22),
        RoomType::Boss => Color::srgb(0.4, 0.16, 0.18),
    }
}

pub(crate) fn door_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Wall, [GameLayer::Player])
}

/// Spawn a built room under `dungeon`. Props and doors are children of the room,
/// positioned relative to its center.
pub fn spawn_room(commands: &mut Commands, dungeon: Entity, build: RoomBuild) -> Entity {
    let RoomBuild {
        room,
        center,
        size,
        decoration,
        decode_error: _,
        puzzle,
    } = build;

    let doors: Vec<_> = room
        .doors()
        .iter()
        .map(|door| (door.anchor, door.size(), door.tint()))
        .collect();
    let room_id = room.id.clone();
    let room_type = room.room_type;

    let room_entity = commands
        .spawn((
            room,
            Sprite {
                color: floor_color(room_type),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(-1.0)),
            Collider::rectangle(size.x, size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
            ChildOf(dungeon),
        ))
        .id();

    if let Some(puzzle) = puzzle {
        commands.entity(room_entity).insert(puzzle);
    }

    let placements = decoration.map(|d| d.placements).unwrap_or_default();
    for placement in &placements {
        let blueprint = &placement.blueprint;
        let local = placement.position.truncate() - center;
        let prop_component = Prop {
            name: placement.name.clone(),
            kind: blueprint.kind,
        };
        let reacts_to_touch = prop_component.reacts_to_touch();
        let mut prop = commands.spawn((
            prop_component,
            Sprite {
                color: blueprint.tint.to_color(),
                custom_size: Some(blueprint.size.to_vec2()),
                ..default()
            },
            // Parent sits at z = -1; keep props on their placement plane.
            Transform::from_translation(local.extend(placement.position.z + 1.0)),
            ChildOf(room_entity),
        ));
        if blueprint.solid {
            prop.insert((
                RigidBody::Static,
                Collider::rectangle(blueprint.size.x, blueprint.size.y),
                CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]),
            ));
        } else if reacts_to_touch {
            prop.insert((
                Collider::rectangle(blueprint.size.x, blueprint.size.y),
                Sensor,
                CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
            ));
        }
        if reacts_to_touch {
            prop.insert((Treasure::default(), CollisionEventsEnabled));
        }
    }

    for (index, (anchor, door_size, tint)) in doors.into_iter().enumerate() {
        commands.spawn((
            DoorVisual {
                index,
                blocking: false,
            },
            Sprite {
                color: tint,
                custom_size: Some(door_size),
                ..default()
            },
            Transform::from_translation(anchor.extend(2.0)),
            ChildOf(room_entity),
        ));
    }

    info!(
        "[ROOM] Spawned room '{}' ({:?}) with {} props",
        room_id,
        room_type,
        placements.len()
    );
    room_entity
}
