//! Rooms domain: messages for room entry and completion.

use bevy::ecs::message::Message;
use bevy::prelude::Entity;

/// An unvisited room just locked around the player.
#[derive(Debug)]
pub struct PlayerEnteredRoomEvent {
    pub room: Entity,
    pub room_id: String,
}

impl Message for PlayerEnteredRoomEvent {}

/// External completion signal: marks the room finished and opens its doors.
#[derive(Debug)]
pub struct RoomFinishedEvent {
    pub room: Entity,
}

impl Message for RoomFinishedEvent {}
