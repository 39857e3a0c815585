//! Progression domain: the fade, swap, teleport sequence between dungeons.

use bevy::prelude::*;
use std::time::Duration;

use crate::content::TransitionSettings;
use crate::core::DungeonError;
use crate::progression::controller::DungeonPlan;

/// Everything the sequencer drives. The Bevy implementation touches the world;
/// tests record the calls.
pub trait TransitionHost {
    fn fade_to(&mut self, alpha: f32, duration: Duration);
    /// Resolve the next dungeon. Must not mutate progression state.
    fn plan_next_dungeon(&mut self) -> Result<DungeonPlan, DungeonError>;
    fn destroy_active_dungeon(&mut self);
    fn advance_dungeon(&mut self, plan: &DungeonPlan);
    fn create_dungeon(&mut self, plan: &DungeonPlan);
    fn locate_entrance(&mut self) -> Result<Vec2, DungeonError>;
    fn teleport_player(&mut self, position: Vec2);
}

#[derive(Debug, Clone, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    /// Screen is going dark; the swap happens when the timer runs out.
    FadingOut { timer: Timer },
    /// New dungeon is live; activations stay blocked until the fade completes.
    FadingIn { timer: Timer },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Swapped {
        plan: DungeonPlan,
        entrance_found: bool,
    },
    /// Planning failed; the old dungeon is still active.
    Blocked(DungeonError),
    Cancelled,
}

/// Single-flight transition state machine, ticked in real time.
#[derive(Resource, Debug, Default)]
pub struct TransitionSequencer {
    phase: TransitionPhase,
    settings: TransitionSettings,
    cancel_requested: bool,
}

impl TransitionSequencer {
    pub fn new(settings: TransitionSettings) -> Self {
        Self {
            settings,
            ..default()
        }
    }

    pub fn phase(&self) -> &TransitionPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, TransitionPhase::Idle)
    }

    /// Start a transition. Returns false (and does nothing) while one is in flight.
    pub fn request(&mut self, host: &mut impl TransitionHost) -> bool {
        if !self.is_idle() {
            return false;
        }
        info!("[TRANSITION] Fading out");
        host.fade_to(self.settings.fade_out_alpha, self.settings.fade_duration());
        self.cancel_requested = false;
        self.phase = TransitionPhase::FadingOut {
            timer: Timer::new(self.settings.swap_delay(), TimerMode::Once),
        };
        true
    }

    /// Ask a fading-out transition to skip the swap. Returns false if there is
    /// nothing left to cancel.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.phase, TransitionPhase::FadingOut { .. }) {
            self.cancel_requested = true;
            return true;
        }
        false
    }

    /// Advance the sequence. Returns the outcome on the tick the swap point is reached.
    pub fn tick(
        &mut self,
        delta: Duration,
        host: &mut impl TransitionHost,
    ) -> Option<TransitionOutcome> {
        match &mut self.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::FadingIn { timer } => {
                timer.tick(delta);
                if timer.remaining_secs() <= 0.0 {
                    debug!("[TRANSITION] Fade in complete");
                    self.phase = TransitionPhase::Idle;
                }
                None
            }
            TransitionPhase::FadingOut { timer } => {
                timer.tick(delta);
                if timer.remaining_secs() > 0.0 {
                    return None;
                }

                let outcome = if self.cancel_requested {
                    info!("[TRANSITION] Cancelled before swap");
                    TransitionOutcome::Cancelled
                } else {
                    Self::swap(host)
                };

                self.cancel_requested = false;
                host.fade_to(self.settings.fade_in_alpha, self.settings.fade_duration());
                self.phase = TransitionPhase::FadingIn {
                    timer: Timer::new(self.settings.fade_duration(), TimerMode::Once),
                };
                Some(outcome)
            }
        }
    }

    fn swap(host: &mut impl TransitionHost) -> TransitionOutcome {
        let plan = match host.plan_next_dungeon() {
            Ok(plan) => plan,
            Err(e) => {
                warn!("[TRANSITION] Keeping current dungeon: {}", e);
                return TransitionOutcome::Blocked(e);
            }
        };

        host.destroy_active_dungeon();
        host.advance_dungeon(&plan);
        host.create_dungeon(&plan);

        let entrance_found = match host.locate_entrance() {
            Ok(position) => {
                host.teleport_player(position);
                true
            }
            Err(e) => {
                warn!("[TRANSITION] Player not moved: {}", e);
                false
            }
        };

        info!(
            "[TRANSITION] Swapped to '{}' (level {}, dungeon {})",
            plan.blueprint_id, plan.cursor.level, plan.cursor.dungeon
        );
        TransitionOutcome::Swapped {
            plan,
            entrance_found,
        }
    }
}
