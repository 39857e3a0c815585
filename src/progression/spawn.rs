//! Progression domain: instantiating a dungeon blueprint and its stairs.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::DungeonDef;
use crate::player::GameLayer;
use crate::progression::controller::{ActiveDungeon, RoomSummary};
use crate::rooms::{RoomContext, build_room, spawn_room};

/// Root entity of a dungeon instance; despawning it removes every room.
#[derive(Component, Debug)]
pub struct DungeonRoot {
    pub blueprint_id: String,
}

/// Portal to the next dungeon
#[derive(Component, Debug)]
pub struct Stairs;

const STAIRS_SIZE: Vec2 = Vec2::new(28.0, 28.0);

pub fn spawn_dungeon(
    commands: &mut Commands,
    def: &DungeonDef,
    ctx: &mut RoomContext,
) -> ActiveDungeon {
    let root = ctx.settings.dungeon_root.to_vec2();
    let entity = commands
        .spawn((
            DungeonRoot {
                blueprint_id: def.id.clone(),
            },
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let mut rooms = Vec::with_capacity(def.rooms.len());
    for room_def in &def.rooms {
        let center = root + room_def.position.to_vec2();
        let build = build_room(room_def, center, ctx);
        let room_entity = spawn_room(commands, entity, build);
        rooms.push(RoomSummary {
            entity: room_entity,
            id: room_def.id.clone(),
            room_type: room_def.room_type,
            position: center,
        });
    }

    if let Some(stairs) = def.stairs {
        let position = root + stairs.to_vec2();
        commands.spawn((
            Stairs,
            Sprite {
                color: Color::srgb(0.85, 0.75, 0.3),
                custom_size: Some(STAIRS_SIZE),
                ..default()
            },
            Transform::from_translation(position.extend(1.0)),
            Collider::rectangle(STAIRS_SIZE.x, STAIRS_SIZE.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
            ChildOf(entity),
        ));
    } else {
        warn!("[PROGRESSION] Dungeon '{}' has no stairs", def.id);
    }

    info!(
        "[PROGRESSION] Created dungeon '{}' ({}) with {} rooms",
        def.id,
        def.name,
        rooms.len()
    );
    ActiveDungeon {
        entity,
        blueprint_id: def.id.clone(),
        rooms,
    }
}
