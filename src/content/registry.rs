//! ContentRegistry resource holding every resolved content definition.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;
use super::template::{PuzzleTemplateSet, TemplateSet};

/// Central registry for all loaded dungeon content.
/// Dungeon blueprints are looked up by id; templates are already decoded.
#[derive(Resource, Debug, Clone)]
pub struct ContentRegistry {
    pub dungeons: HashMap<String, DungeonDef>,
    pub levels: Vec<LevelDef>,
    pub doors: DoorCatalogDef,
    pub room_templates: TemplateSet,
    pub puzzle_templates: PuzzleTemplateSet,
}

impl ContentRegistry {
    pub fn dungeon(&self, id: &str) -> Option<&DungeonDef> {
        self.dungeons.get(id)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Levels: {}\n\
             - Dungeons: {}\n\
             - Room Templates: {} ({} props)\n\
             - Puzzle Templates: {} ({} props, {:?}, time limit {}s)",
            self.levels.len(),
            self.dungeons.len(),
            self.room_templates.templates.len(),
            self.room_templates.bindings.len(),
            self.puzzle_templates.set.templates.len(),
            self.puzzle_templates.set.bindings.len(),
            self.puzzle_templates.difficulty,
            self.puzzle_templates.time_limit,
        )
    }
}
