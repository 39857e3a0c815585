//! Player domain: components, physics layers, and movement resources.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Closed doors and solid props
    Wall,
    /// Player character
    Player,
    /// Room bounds and stairs - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Top-down movement tuning (no gravity, no jumping).
#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
    /// How quickly the camera closes the gap to the player, per second.
    pub camera_follow_rate: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 220.0,
            accel: 2400.0,
            decel: 2000.0,
            camera_follow_rate: 8.0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
}
