//! Rooms domain: per-room state machine and the room build pipeline
//! (tiles, then decoding, then doors).

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::content::{
    ContentRegistry, DoorCatalogDef, DungeonSettings, PuzzleTemplateSet, RoomDef, RoomType,
    TemplateSet,
};
use crate::core::DungeonError;
use crate::rooms::components::PuzzleSettings;
use crate::rooms::decoder::{Decoration, decorate};
use crate::rooms::doors::DoorSet;
use crate::tiles::{TileGrid, TileSequence, detect_tiles};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState {
    /// Free and Entrance rooms: never lock, never report entry.
    Inert,
    Unvisited,
    /// Player is inside and the doors were ordered shut.
    Locked,
    Finished,
}

#[derive(Component, Debug, Clone)]
pub struct Room {
    pub id: String,
    pub room_type: RoomType,
    state: RoomState,
    tiles: TileSequence,
    doors: DoorSet,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        room_type: RoomType,
        tiles: TileSequence,
        doors: DoorSet,
    ) -> Self {
        let state = if room_type.is_default() {
            RoomState::Inert
        } else {
            RoomState::Unvisited
        };
        Self {
            id: id.into(),
            room_type,
            state,
            tiles,
            doors,
        }
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == RoomState::Finished
    }

    pub fn tiles(&self) -> &TileSequence {
        &self.tiles
    }

    pub fn doors(&self) -> &DoorSet {
        &self.doors
    }

    /// Whether a player touching this room should be announced.
    pub fn awaits_entry(&self) -> bool {
        self.state == RoomState::Unvisited
    }

    /// Only an unvisited room reacts; it moves to `Locked` and the caller
    /// closes the doors. Returns false otherwise.
    pub fn on_player_entered(&mut self) -> bool {
        if self.state != RoomState::Unvisited {
            return false;
        }
        self.state = RoomState::Locked;
        true
    }

    /// Marks the room finished and opens every door. Inert rooms ignore this.
    pub fn finish(&mut self) -> bool {
        if self.state == RoomState::Inert {
            return false;
        }
        self.state = RoomState::Finished;
        self.doors.open_all();
        true
    }

    pub fn open_doors(&mut self) {
        self.doors.open_all();
    }

    pub fn close_doors(&mut self) {
        self.doors.close_all();
    }
}

/// Everything a room build reads, passed in rather than looked up globally.
pub struct RoomContext<'a> {
    pub doors: &'a DoorCatalogDef,
    pub room_templates: &'a TemplateSet,
    pub puzzle_templates: &'a PuzzleTemplateSet,
    pub settings: &'a DungeonSettings,
    pub rng: &'a mut ChaCha8Rng,
}

impl<'a> RoomContext<'a> {
    pub fn new(
        registry: &'a ContentRegistry,
        settings: &'a DungeonSettings,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        Self {
            doors: &registry.doors,
            room_templates: &registry.room_templates,
            puzzle_templates: &registry.puzzle_templates,
            settings,
            rng,
        }
    }
}

/// A built room, ready to be spawned.
#[derive(Debug, Clone)]
pub struct RoomBuild {
    pub room: Room,
    /// World-space room center.
    pub center: Vec2,
    /// World-space size of the occupancy grid.
    pub size: Vec2,
    pub decoration: Option<Decoration>,
    pub decode_error: Option<DungeonError>,
    pub puzzle: Option<PuzzleSettings>,
}

/// World position of the grid's bottom-left corner for a room centered at `center`.
pub fn grid_origin(def: &RoomDef, center: Vec2, cell_size: f32) -> Vec3 {
    let size = Vec2::new(def.grid_width() as f32, def.grid_height() as f32) * cell_size;
    (center - size * 0.5).extend(0.0)
}

pub fn build_room(def: &RoomDef, center: Vec2, ctx: &mut RoomContext) -> RoomBuild {
    let cell_size = ctx.settings.tiles.cell_size;
    let grid = TileGrid::from_rows(&def.tiles, cell_size, grid_origin(def, center, cell_size));

    let mut tiles = TileSequence::default();
    let mut decoration = None;
    let mut decode_error = None;
    let mut puzzle = None;

    if !def.room_type.is_default() {
        tiles = detect_tiles(&grid);

        let set = match def.room_type {
            RoomType::Puzzle => {
                puzzle = Some(PuzzleSettings {
                    difficulty: ctx.puzzle_templates.difficulty,
                    time_limit: ctx.puzzle_templates.time_limit,
                });
                &ctx.puzzle_templates.set
            }
            _ => ctx.room_templates,
        };

        match decorate(
            set,
            &mut tiles,
            ctx.settings.decoding.match_policy,
            ctx.settings.tiles.placement_z,
            &mut *ctx.rng,
        ) {
            Ok(result) => decoration = Some(result),
            Err(e) => {
                warn!("[ROOM] Room '{}' left undecorated: {}", def.id, e);
                decode_error = Some(e);
            }
        }
    }

    let doors = DoorSet::build(&def.doors, ctx.doors);

    RoomBuild {
        room: Room::new(def.id.clone(), def.room_type, tiles, doors),
        center,
        size: grid.world_size(),
        decoration,
        decode_error,
        puzzle,
    }
}
