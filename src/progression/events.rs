//! Progression domain: messages for portals and dungeon swaps.

use bevy::ecs::message::Message;

/// The player stepped onto the stairs of the active dungeon.
#[derive(Debug)]
pub struct PortalActivatedEvent;

impl Message for PortalActivatedEvent {}

/// A new dungeon became active.
#[derive(Debug)]
pub struct DungeonChangedEvent {
    pub level: usize,
    pub dungeon: usize,
    pub dungeon_id: String,
}

impl Message for DungeonChangedEvent {}
