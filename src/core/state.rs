//! Core domain: game state definitions for the run flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Content is loading or failed to load.
    #[default]
    Boot,
    /// A dungeon is live and the player can move through it.
    Run,
}
