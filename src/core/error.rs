//! Core domain: error taxonomy shared by room building and progression.

use thiserror::Error;

use crate::content::PropColor;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DungeonError {
    /// A template set or binding table was empty when a pick/decode was attempted.
    #[error("no {what} configured")]
    ConfigurationMissing { what: &'static str },

    /// Template pixel count does not line up with the room's tile sequence.
    #[error("template '{template}' has {pixels} pixels but the room has {tiles} tile slots")]
    AlignmentMismatch {
        template: String,
        pixels: usize,
        tiles: usize,
    },

    /// More than one binding matched a pixel under `BindingMatchPolicy::RejectAmbiguous`.
    #[error("pixel ({x}, {y}) with color {color} matches {matches} bindings")]
    AmbiguousBinding {
        x: u32,
        y: u32,
        color: PropColor,
        matches: usize,
    },

    /// Advancing would move the level index past the end of the catalog.
    #[error("level {level} is past the end of the catalog ({levels} levels)")]
    ProgressionExhausted { level: usize, levels: usize },

    /// No Entrance room exists in the active dungeon. Non-fatal.
    #[error("dungeon '{dungeon}' has no entrance room")]
    MissingEntranceRoom { dungeon: String },

    #[error("dungeon blueprint '{id}' is not registered")]
    UnknownDungeon { id: String },
}
