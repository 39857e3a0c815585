//! Progression domain: full-screen fade used to hide dungeon swaps.

use bevy::prelude::*;
use std::time::Duration;

/// Linear alpha tween. Always lands exactly on the target.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScreenFade {
    alpha: f32,
    from: f32,
    target: f32,
    duration: Duration,
    elapsed: Duration,
}

impl ScreenFade {
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_fading(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Start fading from the current alpha. A zero duration applies the target at once.
    pub fn fade_to(&mut self, target: f32, duration: Duration) {
        self.from = self.alpha;
        self.target = target;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        if duration.is_zero() {
            self.alpha = target;
        }
    }

    pub fn tick(&mut self, delta: Duration) {
        if !self.is_fading() {
            return;
        }
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.alpha = if self.elapsed >= self.duration {
            self.target
        } else {
            let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
            self.from + (self.target - self.from) * t
        };
    }
}

/// Marker for the full-screen fade node
#[derive(Component)]
pub struct FadeOverlay;

pub(crate) fn spawn_fade_overlay(mut commands: Commands) {
    commands.spawn((
        FadeOverlay,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            right: Val::Px(0.0),
            top: Val::Px(0.0),
            bottom: Val::Px(0.0),
            ..default()
        },
        BackgroundColor(Color::BLACK.with_alpha(0.0)),
        ZIndex(100),
    ));
}

pub(crate) fn update_screen_fade(
    time: Res<Time<Real>>,
    mut fade: ResMut<ScreenFade>,
    mut overlay_query: Query<&mut BackgroundColor, With<FadeOverlay>>,
) {
    fade.tick(time.delta());
    for mut background in &mut overlay_query {
        background.0 = Color::BLACK.with_alpha(fade.alpha());
    }
}
