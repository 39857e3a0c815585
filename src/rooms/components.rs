//! Rooms domain: entity components for props, doors, and puzzle rooms.

use bevy::prelude::*;
use std::time::Duration;

use crate::content::{PropKind, PuzzleDifficulty};

/// Puzzle parameters attached to every puzzle room for the puzzle logic to read.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PuzzleSettings {
    pub difficulty: PuzzleDifficulty,
    /// Seconds; 0 means no limit.
    pub time_limit: f32,
}

impl PuzzleSettings {
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit > 0.0).then(|| Duration::from_secs_f32(self.time_limit))
    }
}

/// A decoded template prop, child of its room.
#[derive(Component, Debug)]
pub struct Prop {
    pub name: String,
    pub kind: PropKind,
}

impl Prop {
    /// Props that react to the player touching them get a sensor.
    pub fn reacts_to_touch(&self) -> bool {
        matches!(self.kind, PropKind::Treasure)
    }
}

/// A chest that opens on first touch and stays open.
#[derive(Component, Debug, Default)]
pub struct Treasure {
    opened: bool,
}

impl Treasure {
    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Returns true only on the touch that opens it.
    pub fn open(&mut self) -> bool {
        if self.opened {
            return false;
        }
        self.opened = true;
        true
    }
}

/// Visual for door `index` of the parent room's door set.
#[derive(Component, Debug)]
pub struct DoorVisual {
    pub index: usize,
    /// Whether the blocking collider is currently attached.
    pub blocking: bool,
}
