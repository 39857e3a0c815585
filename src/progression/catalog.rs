//! Progression domain: the ordered level catalog and the position within it.

use crate::content::LevelDef;
use crate::core::DungeonError;

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    /// Dungeon blueprint ids, played in order.
    pub dungeons: Vec<String>,
}

/// (level, dungeon) index pair into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DungeonCursor {
    pub level: usize,
    pub dungeon: usize,
}

impl DungeonCursor {
    pub fn new(level: usize, dungeon: usize) -> Self {
        Self { level, dungeon }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    pub fn from_defs(defs: &[LevelDef]) -> Self {
        Self::new(
            defs.iter()
                .map(|def| Level {
                    name: def.name.clone(),
                    dungeons: def.dungeons.clone(),
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn blueprint_id(&self, cursor: DungeonCursor) -> Result<&str, DungeonError> {
        let level = self
            .levels
            .get(cursor.level)
            .ok_or(DungeonError::ProgressionExhausted {
                level: cursor.level,
                levels: self.levels.len(),
            })?;
        level
            .dungeons
            .get(cursor.dungeon)
            .map(String::as_str)
            .ok_or(DungeonError::ConfigurationMissing {
                what: "dungeons for this level",
            })
    }

    /// Next dungeon in the level, or the first dungeon of the next level.
    /// Fails once the level index would run past the catalog.
    pub fn next(&self, cursor: DungeonCursor) -> Result<DungeonCursor, DungeonError> {
        let dungeons_in_level = self
            .levels
            .get(cursor.level)
            .map(|level| level.dungeons.len())
            .unwrap_or(0);

        let next = if cursor.dungeon + 1 < dungeons_in_level {
            DungeonCursor::new(cursor.level, cursor.dungeon + 1)
        } else {
            DungeonCursor::new(cursor.level + 1, 0)
        };

        if next.level >= self.levels.len() {
            return Err(DungeonError::ProgressionExhausted {
                level: next.level,
                levels: self.levels.len(),
            });
        }
        Ok(next)
    }
}
