//! Player domain: tests for velocity steering.

use bevy::prelude::*;

use super::MovementTuning;
use super::systems::steer;

fn tuning() -> MovementTuning {
    MovementTuning {
        max_speed: 100.0,
        accel: 1000.0,
        decel: 500.0,
        camera_follow_rate: 8.0,
    }
}

#[test]
fn test_steer_accelerates_toward_input() {
    let velocity = steer(Vec2::ZERO, Vec2::X, &tuning(), 0.05);
    assert!((velocity.x - 50.0).abs() < 1e-3);
    assert_eq!(velocity.y, 0.0);
}

#[test]
fn test_steer_clamps_at_max_speed() {
    let velocity = steer(Vec2::new(90.0, 0.0), Vec2::X, &tuning(), 1.0);
    assert_eq!(velocity, Vec2::new(100.0, 0.0));
}

#[test]
fn test_steer_decelerates_to_rest_without_input() {
    let tuning = tuning();
    let slowed = steer(Vec2::new(0.0, 100.0), Vec2::ZERO, &tuning, 0.1);
    assert!((slowed.y - 50.0).abs() < 1e-3);

    let stopped = steer(slowed, Vec2::ZERO, &tuning, 1.0);
    assert_eq!(stopped, Vec2::ZERO);
}

#[test]
fn test_steer_reverses_direction() {
    let velocity = steer(Vec2::new(100.0, 0.0), -Vec2::X, &tuning(), 0.1);
    assert!((velocity.x - 0.0).abs() < 1e-3);
}
