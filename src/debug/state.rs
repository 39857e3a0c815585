//! Debug domain: toggles for dev-only overlays.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Draw every room's tile slots (green available, red used)
    pub show_tiles: bool,
}
