//! Player domain: spawning, input sampling, velocity steering, and camera follow.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::player::{GameLayer, MovementInput, MovementTuning, Player};

const PLAYER_SIZE: Vec2 = Vec2::new(20.0, 20.0);

pub(crate) fn spawn_player(mut commands: Commands, existing_player: Query<Entity, With<Player>>) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    commands.spawn((
        Player,
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Player, [GameLayer::Wall, GameLayer::Sensor]),
        ),
    ));
}

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    input.axis = axis.normalize_or_zero();
}

/// Accelerate toward `axis * max_speed`, or decelerate to rest when there is no input.
pub(crate) fn steer(velocity: Vec2, axis: Vec2, tuning: &MovementTuning, dt: f32) -> Vec2 {
    if axis.length_squared() > 0.01 {
        let target = axis * tuning.max_speed;
        let delta = target - velocity;
        let step = tuning.accel * dt;
        if delta.length() <= step {
            target
        } else {
            velocity + delta.normalize() * step
        }
    } else {
        let speed = velocity.length();
        let step = tuning.decel * dt;
        if speed <= step {
            Vec2::ZERO
        } else {
            velocity * ((speed - step) / speed)
        }
    }
}

pub(crate) fn apply_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    let dt = time.delta_secs();
    for mut velocity in &mut query {
        velocity.0 = steer(velocity.0, input.axis, &tuning, dt);
    }
}

pub(crate) fn follow_player(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let t = (tuning.camera_follow_rate * time.delta_secs()).min(1.0);
    for mut camera in &mut camera_query {
        let target = player.translation.truncate();
        let current = camera.translation.truncate();
        let next = current.lerp(target, t);
        camera.translation.x = next.x;
        camera.translation.y = next.y;
    }
}
