//! Data definitions for the dungeon content files.
//!
//! These structs mirror assets/data/*.ron and are only used for
//! deserialization; the ContentRegistry holds the resolved forms.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::template::PropColor;

/// Generic wrapper for RON data files with schema versioning.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}

impl Vec2Def {
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2Def> for Vec2 {
    fn from(value: Vec2Def) -> Self {
        value.to_vec2()
    }
}

// ============================================================================
// Dungeon library (dungeon_library.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    /// Door construction order.
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    /// Whether a door on this wall spans the x axis.
    pub fn is_horizontal_wall(self) -> bool {
        matches!(self, CardinalDirection::North | CardinalDirection::South)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LevelDef {
    pub name: String,
    pub dungeons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DoorBlueprintDef {
    /// Size for a north/south door; east/west doors use it rotated.
    pub size: Vec2Def,
    pub open_tint: PropColor,
    pub closed_tint: PropColor,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DoorCatalogDef {
    pub north: DoorBlueprintDef,
    pub south: DoorBlueprintDef,
    pub east: DoorBlueprintDef,
    pub west: DoorBlueprintDef,
}

impl DoorCatalogDef {
    pub fn get(&self, direction: CardinalDirection) -> &DoorBlueprintDef {
        match direction {
            CardinalDirection::North => &self.north,
            CardinalDirection::South => &self.south,
            CardinalDirection::East => &self.east,
            CardinalDirection::West => &self.west,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DungeonLibraryDef {
    pub schema_version: u32,
    pub levels: Vec<LevelDef>,
    pub doors: DoorCatalogDef,
}

// ============================================================================
// Dungeons (dungeons.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum RoomType {
    #[default]
    Free,
    Entrance,
    Puzzle,
    Enemy,
    Boss,
}

impl RoomType {
    /// Free and Entrance rooms never detect tiles, decode templates or lock.
    pub fn is_default(self) -> bool {
        matches!(self, RoomType::Free | RoomType::Entrance)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DoorAnchorsDef {
    pub north: Vec<Vec2Def>,
    pub south: Vec<Vec2Def>,
    pub east: Vec<Vec2Def>,
    pub west: Vec<Vec2Def>,
}

impl DoorAnchorsDef {
    pub fn get(&self, direction: CardinalDirection) -> &[Vec2Def] {
        match direction {
            CardinalDirection::North => &self.north,
            CardinalDirection::South => &self.south,
            CardinalDirection::East => &self.east,
            CardinalDirection::West => &self.west,
        }
    }

    pub fn len(&self) -> usize {
        CardinalDirection::ALL
            .iter()
            .map(|direction| self.get(*direction).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomDef {
    pub id: String,
    pub room_type: RoomType,
    /// Room center, relative to the dungeon root.
    pub position: Vec2Def,
    /// Occupancy rows, top row first. `#` marks an occupiable cell.
    pub tiles: Vec<String>,
    /// Door anchors relative to the room center.
    #[serde(default)]
    pub doors: DoorAnchorsDef,
}

impl RoomDef {
    pub fn grid_width(&self) -> usize {
        self.tiles.iter().map(|row| row.chars().count()).max().unwrap_or(0)
    }

    pub fn grid_height(&self) -> usize {
        self.tiles.len()
    }

    pub fn occupied_cells(&self) -> usize {
        self.tiles
            .iter()
            .map(|row| row.chars().filter(|c| *c == '#').count())
            .sum()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DungeonDef {
    pub id: String,
    pub name: String,
    pub rooms: Vec<RoomDef>,
    /// Portal to the next dungeon, relative to the dungeon root.
    #[serde(default)]
    pub stairs: Option<Vec2Def>,
}

impl DungeonDef {
    pub fn entrance(&self) -> Option<&RoomDef> {
        self.rooms
            .iter()
            .find(|room| room.room_type == RoomType::Entrance)
    }
}

// ============================================================================
// Templates (room_templates.ron, puzzle_templates.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum PropKind {
    #[default]
    Decoration,
    Obstacle,
    Treasure,
    Hazard,
    Enemy,
    Interactable,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PropBlueprint {
    pub kind: PropKind,
    pub size: Vec2Def,
    pub tint: PropColor,
    /// Solid props get a static collider on the wall layer.
    #[serde(default)]
    pub solid: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PropDef {
    pub name: String,
    pub color: PropColor,
    pub blueprint: PropBlueprint,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum TemplateSource {
    /// Inline grid, top row first, each char looked up in the legend.
    Grid {
        legend: BTreeMap<char, PropColor>,
        rows: Vec<String>,
    },
    /// PNG file relative to the content directory.
    Image { path: String },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateDef {
    pub id: String,
    pub source: TemplateSource,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateSetDef {
    pub schema_version: u32,
    pub templates: Vec<TemplateDef>,
    pub props: Vec<PropDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum PuzzleDifficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PuzzleTemplateSetDef {
    pub schema_version: u32,
    pub templates: Vec<TemplateDef>,
    pub props: Vec<PropDef>,
    #[serde(default)]
    pub difficulty: PuzzleDifficulty,
    /// Seconds; 0 means no limit.
    #[serde(default)]
    pub time_limit: f32,
}

// ============================================================================
// Settings (dungeon_settings.ron)
// ============================================================================

/// What to do when more than one binding matches a template pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum BindingMatchPolicy {
    /// Instantiate only the first matching binding in table order.
    #[default]
    FirstMatch,
    /// Instantiate every matching binding at the same slot.
    InstantiateAll,
    /// Fail the decode.
    RejectAmbiguous,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TileSettings {
    pub cell_size: f32,
    /// Z plane every decoded prop is placed on.
    pub placement_z: f32,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            cell_size: 32.0,
            placement_z: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DecodeSettings {
    pub match_policy: BindingMatchPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransitionSettings {
    pub fade_out_alpha: f32,
    pub fade_in_alpha: f32,
    pub fade_duration_secs: f32,
    /// Real-time pause between starting the fade out and swapping dungeons.
    pub swap_delay_secs: f32,
}

const DEFAULT_FADE_SECS: f32 = 1.5;
const DEFAULT_SWAP_DELAY_SECS: f32 = 1.5;

/// Negative and NaN clamp to zero; values too large for a `Duration` fall back to `default`.
fn settings_duration(secs: f32, default: f32) -> Duration {
    Duration::try_from_secs_f32(secs.max(0.0))
        .unwrap_or_else(|_| Duration::from_secs_f32(default))
}

impl TransitionSettings {
    pub fn fade_duration(&self) -> Duration {
        settings_duration(self.fade_duration_secs, DEFAULT_FADE_SECS)
    }

    pub fn swap_delay(&self) -> Duration {
        settings_duration(self.swap_delay_secs, DEFAULT_SWAP_DELAY_SECS)
    }
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            fade_out_alpha: 1.0,
            fade_in_alpha: 0.0,
            fade_duration_secs: DEFAULT_FADE_SECS,
            swap_delay_secs: DEFAULT_SWAP_DELAY_SECS,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DungeonSettings {
    pub schema_version: u32,
    /// Fixed run seed; a random one is drawn when absent.
    pub seed: Option<u64>,
    /// World position every dungeon is instantiated under.
    pub dungeon_root: Vec2Def,
    pub tiles: TileSettings,
    pub decoding: DecodeSettings,
    pub transition: TransitionSettings,
}

impl Default for DungeonSettings {
    fn default() -> Self {
        Self {
            schema_version: 1,
            seed: None,
            dungeon_root: Vec2Def::default(),
            tiles: TileSettings::default(),
            decoding: DecodeSettings::default(),
            transition: TransitionSettings::default(),
        }
    }
}
