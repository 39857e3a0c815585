//! Progression domain: current catalog position, the single active dungeon,
//! and the advance/entrance operations the transition relies on.

use bevy::prelude::*;

use crate::content::RoomType;
use crate::core::DungeonError;
use crate::progression::catalog::{DungeonCursor, LevelCatalog};
use crate::rooms::Room;

#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub entity: Entity,
    pub id: String,
    pub room_type: RoomType,
    /// World-space room center.
    pub position: Vec2,
}

/// The live dungeon instance. At most one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDungeon {
    pub entity: Entity,
    pub blueprint_id: String,
    pub rooms: Vec<RoomSummary>,
}

impl ActiveDungeon {
    pub fn entrance(&self) -> Option<&RoomSummary> {
        self.rooms
            .iter()
            .find(|room| room.room_type == RoomType::Entrance)
    }
}

/// The catalog position a swap will move to, resolved before anything is torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DungeonPlan {
    pub cursor: DungeonCursor,
    pub blueprint_id: String,
}

#[derive(Resource, Debug, Default)]
pub struct LevelProgression {
    catalog: LevelCatalog,
    cursor: DungeonCursor,
    active: Option<ActiveDungeon>,
    current_room: Option<Entity>,
}

impl LevelProgression {
    pub fn new(catalog: LevelCatalog) -> Self {
        Self {
            catalog,
            ..default()
        }
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn cursor(&self) -> DungeonCursor {
        self.cursor
    }

    pub fn active(&self) -> Option<&ActiveDungeon> {
        self.active.as_ref()
    }

    pub fn current_room(&self) -> Option<Entity> {
        self.current_room
    }

    /// Plan for the dungeon at the current cursor (the first dungeon of a run).
    pub fn current_plan(&self) -> Result<DungeonPlan, DungeonError> {
        Ok(DungeonPlan {
            cursor: self.cursor,
            blueprint_id: self.catalog.blueprint_id(self.cursor)?.to_string(),
        })
    }

    /// Resolve the next dungeon without changing any state.
    pub fn plan_advance(&self) -> Result<DungeonPlan, DungeonError> {
        let cursor = self.catalog.next(self.cursor)?;
        Ok(DungeonPlan {
            cursor,
            blueprint_id: self.catalog.blueprint_id(cursor)?.to_string(),
        })
    }

    pub fn commit(&mut self, plan: &DungeonPlan) {
        self.cursor = plan.cursor;
    }

    /// Move to the next dungeon; on failure the indices are left untouched.
    pub fn advance_dungeon(&mut self) -> Result<DungeonCursor, DungeonError> {
        let plan = self.plan_advance()?;
        self.commit(&plan);
        Ok(self.cursor)
    }

    /// Install a freshly created dungeon as the sole active one.
    /// Returns the previous instance if the caller forgot to destroy it.
    pub fn set_active(&mut self, dungeon: ActiveDungeon) -> Option<ActiveDungeon> {
        self.current_room = None;
        self.active.replace(dungeon)
    }

    pub fn take_active(&mut self) -> Option<ActiveDungeon> {
        self.current_room = None;
        self.active.take()
    }

    pub fn is_active_dungeon(&self, entity: Entity) -> bool {
        self.active
            .as_ref()
            .is_some_and(|dungeon| dungeon.entity == entity)
    }

    /// Consume a room entry. Rooms outside the active dungeon (`parent` is the
    /// room's dungeon root) are rejected untouched. An accepted room locks,
    /// becomes the current room, and has its doors commanded shut.
    pub fn accept_entry(&mut self, room_entity: Entity, parent: Entity, room: &mut Room) -> bool {
        if !self.is_active_dungeon(parent) {
            return false;
        }
        if !room.on_player_entered() {
            return false;
        }
        self.current_room = Some(room_entity);
        room.close_doors();
        true
    }

    pub fn locate_entrance(&self) -> Result<Vec2, DungeonError> {
        let Some(active) = self.active.as_ref() else {
            return Err(DungeonError::MissingEntranceRoom {
                dungeon: String::new(),
            });
        };
        active
            .entrance()
            .map(|room| room.position)
            .ok_or_else(|| DungeonError::MissingEntranceRoom {
                dungeon: active.blueprint_id.clone(),
            })
    }
}
