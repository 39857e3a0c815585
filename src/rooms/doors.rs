//! Rooms domain: doors per cardinal direction and the open/close commands.

use bevy::prelude::*;

use crate::content::{CardinalDirection, DoorAnchorsDef, DoorBlueprintDef, DoorCatalogDef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorState {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub direction: CardinalDirection,
    /// Offset from the room center.
    pub anchor: Vec2,
    pub blueprint: DoorBlueprintDef,
    state: DoorState,
    commands_issued: u32,
}

impl Door {
    pub fn new(direction: CardinalDirection, anchor: Vec2, blueprint: DoorBlueprintDef) -> Self {
        Self {
            direction,
            anchor,
            blueprint,
            state: DoorState::Open,
            commands_issued: 0,
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    /// Number of open/close commands this door has received.
    pub fn commands_issued(&self) -> u32 {
        self.commands_issued
    }

    fn command(&mut self, state: DoorState) {
        self.state = state;
        self.commands_issued += 1;
    }

    /// Footprint; east/west doors are the blueprint rotated a quarter turn.
    pub fn size(&self) -> Vec2 {
        let size = self.blueprint.size.to_vec2();
        if self.direction.is_horizontal_wall() {
            size
        } else {
            Vec2::new(size.y, size.x)
        }
    }

    pub fn tint(&self) -> Color {
        match self.state {
            DoorState::Open => self.blueprint.open_tint.to_color(),
            DoorState::Closed => self.blueprint.closed_tint.to_color(),
        }
    }
}

/// All doors of one room. Fixed once built; only opened and closed afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoorSet {
    doors: Vec<Door>,
}

impl DoorSet {
    /// One door per configured anchor, directions in north, south, east, west order.
    pub fn build(anchors: &DoorAnchorsDef, catalog: &DoorCatalogDef) -> Self {
        let doors = CardinalDirection::ALL
            .iter()
            .flat_map(|direction| {
                let blueprint = catalog.get(*direction);
                anchors
                    .get(*direction)
                    .iter()
                    .map(move |anchor| Door::new(*direction, anchor.to_vec2(), blueprint.clone()))
            })
            .collect();
        Self { doors }
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Door> {
        self.doors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter()
    }

    /// Commands every door, including ones already open.
    pub fn open_all(&mut self) {
        for door in &mut self.doors {
            door.command(DoorState::Open);
        }
    }

    /// Commands every door, including ones already closed.
    pub fn close_all(&mut self) {
        for door in &mut self.doors {
            door.command(DoorState::Closed);
        }
    }

    pub fn all_open(&self) -> bool {
        self.doors.iter().all(Door::is_open)
    }

    pub fn all_closed(&self) -> bool {
        self.doors.iter().all(|door| !door.is_open())
    }
}
