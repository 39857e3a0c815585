//! Progression domain: first dungeon, room locking, portal detection, and
//! the world-side transition host.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

use crate::content::{ContentRegistry, DungeonSettings};
use crate::core::{DungeonError, DungeonRng};
use crate::player::Player;
use crate::progression::catalog::LevelCatalog;
use crate::progression::controller::{DungeonPlan, LevelProgression};
use crate::progression::events::{DungeonChangedEvent, PortalActivatedEvent};
use crate::progression::fade::ScreenFade;
use crate::progression::spawn::{Stairs, spawn_dungeon};
use crate::progression::transition::{TransitionHost, TransitionOutcome, TransitionSequencer};
use crate::rooms::{PlayerEnteredRoomEvent, Room, RoomContext};

/// Bevy-side host: spawns and despawns dungeons, drives the fade, moves the player.
struct WorldTransitionHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    progression: &'a mut LevelProgression,
    registry: &'a ContentRegistry,
    settings: &'a DungeonSettings,
    rng: &'a mut ChaCha8Rng,
    fade: &'a mut ScreenFade,
    player: Option<&'a mut Transform>,
}

impl TransitionHost for WorldTransitionHost<'_, '_, '_> {
    fn fade_to(&mut self, alpha: f32, duration: Duration) {
        self.fade.fade_to(alpha, duration);
    }

    fn plan_next_dungeon(&mut self) -> Result<DungeonPlan, DungeonError> {
        let plan = self.progression.plan_advance()?;
        if self.registry.dungeon(&plan.blueprint_id).is_none() {
            return Err(DungeonError::UnknownDungeon {
                id: plan.blueprint_id,
            });
        }
        Ok(plan)
    }

    fn destroy_active_dungeon(&mut self) {
        if let Some(active) = self.progression.take_active() {
            debug!("[PROGRESSION] Destroying dungeon '{}'", active.blueprint_id);
            self.commands.entity(active.entity).despawn();
        }
    }

    fn advance_dungeon(&mut self, plan: &DungeonPlan) {
        self.progression.commit(plan);
    }

    fn create_dungeon(&mut self, plan: &DungeonPlan) {
        let Some(def) = self.registry.dungeon(&plan.blueprint_id) else {
            error!(
                "[PROGRESSION] Dungeon '{}' vanished after planning",
                plan.blueprint_id
            );
            return;
        };
        let mut ctx = RoomContext::new(self.registry, self.settings, self.rng);
        let active = spawn_dungeon(self.commands, def, &mut ctx);
        if let Some(stale) = self.progression.set_active(active) {
            warn!("[PROGRESSION] Replacing undestroyed dungeon '{}'", stale.blueprint_id);
            self.commands.entity(stale.entity).despawn();
        }
    }

    fn locate_entrance(&mut self) -> Result<Vec2, DungeonError> {
        self.progression.locate_entrance()
    }

    fn teleport_player(&mut self, position: Vec2) {
        match self.player.as_deref_mut() {
            Some(transform) => {
                transform.translation.x = position.x;
                transform.translation.y = position.y;
            }
            None => warn!("[TRANSITION] No player to teleport"),
        }
    }
}

/// Build the first dungeon of the catalog and drop the player at its entrance.
pub(crate) fn start_first_dungeon(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    settings: Res<DungeonSettings>,
    mut rng: ResMut<DungeonRng>,
    mut progression: ResMut<LevelProgression>,
    mut sequencer: ResMut<TransitionSequencer>,
    mut fade: ResMut<ScreenFade>,
    mut player_query: Query<&mut Transform, With<Player>>,
    mut changed_events: MessageWriter<DungeonChangedEvent>,
) {
    *progression = LevelProgression::new(LevelCatalog::from_defs(&registry.levels));
    *sequencer = TransitionSequencer::new(settings.transition.clone());

    let plan = match progression.current_plan() {
        Ok(plan) if registry.dungeon(&plan.blueprint_id).is_some() => plan,
        Ok(plan) => {
            error!(
                "[PROGRESSION] {}",
                DungeonError::UnknownDungeon {
                    id: plan.blueprint_id
                }
            );
            return;
        }
        Err(e) => {
            error!("[PROGRESSION] No starting dungeon: {}", e);
            return;
        }
    };

    let mut player = player_query.single_mut().ok();
    let mut host = WorldTransitionHost {
        commands: &mut commands,
        progression: &mut progression,
        registry: &registry,
        settings: &settings,
        rng: &mut rng.0,
        fade: &mut fade,
        player: player.as_deref_mut(),
    };
    host.create_dungeon(&plan);
    match host.locate_entrance() {
        Ok(position) => host.teleport_player(position),
        Err(e) => warn!("[PROGRESSION] {}", e),
    }

    changed_events.write(DungeonChangedEvent {
        level: plan.cursor.level,
        dungeon: plan.cursor.dungeon,
        dungeon_id: plan.blueprint_id,
    });
}

/// Locks a room the player just entered, if it belongs to the active dungeon.
/// Notifications from a destroyed dungeon are dropped.
pub(crate) fn lock_room_on_entry(
    mut entered_events: MessageReader<PlayerEnteredRoomEvent>,
    mut progression: ResMut<LevelProgression>,
    mut room_query: Query<(&mut Room, &ChildOf)>,
) {
    for event in entered_events.read() {
        let Ok((mut room, child_of)) = room_query.get_mut(event.room) else {
            debug!("[PROGRESSION] Dropping entry for despawned room '{}'", event.room_id);
            continue;
        };
        if !progression.accept_entry(event.room, child_of.parent(), &mut room) {
            debug!("[PROGRESSION] Dropping entry for room '{}'", event.room_id);
            continue;
        }

        info!(
            "[DOORS] Closed {} doors of room '{}'",
            room.doors().len(),
            event.room_id
        );
    }
}

pub(crate) fn detect_portal(
    mut collision_start_events: MessageReader<CollisionStart>,
    player_query: Query<Entity, With<Player>>,
    stairs_query: Query<(), With<Stairs>>,
    mut portal_events: MessageWriter<PortalActivatedEvent>,
) {
    let Some(player_entity) = player_query.iter().next() else {
        // Consume events if no player
        for _ in collision_start_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let other = if stairs_query.contains(event.collider1) {
            event.collider2
        } else if stairs_query.contains(event.collider2) {
            event.collider1
        } else {
            continue;
        };

        if other == player_entity {
            info!("[PORTAL] Player reached the stairs");
            portal_events.write(PortalActivatedEvent);
        }
    }
}

/// Feeds portal activations into the sequencer and ticks it in real time.
pub(crate) fn run_transition(
    mut commands: Commands,
    mut portal_events: MessageReader<PortalActivatedEvent>,
    mut changed_events: MessageWriter<DungeonChangedEvent>,
    time: Res<Time<Real>>,
    registry: Res<ContentRegistry>,
    settings: Res<DungeonSettings>,
    mut rng: ResMut<DungeonRng>,
    mut sequencer: ResMut<TransitionSequencer>,
    mut progression: ResMut<LevelProgression>,
    mut fade: ResMut<ScreenFade>,
    mut player_query: Query<&mut Transform, With<Player>>,
) {
    let mut player = player_query.single_mut().ok();
    let mut host = WorldTransitionHost {
        commands: &mut commands,
        progression: &mut progression,
        registry: &registry,
        settings: &settings,
        rng: &mut rng.0,
        fade: &mut fade,
        player: player.as_deref_mut(),
    };

    for _ in portal_events.read() {
        if !sequencer.request(&mut host) {
            info!("[TRANSITION] Portal ignored, transition already in flight");
        }
    }

    match sequencer.tick(time.delta(), &mut host) {
        Some(TransitionOutcome::Swapped { plan, .. }) => {
            changed_events.write(DungeonChangedEvent {
                level: plan.cursor.level,
                dungeon: plan.cursor.dungeon,
                dungeon_id: plan.blueprint_id,
            });
        }
        Some(TransitionOutcome::Blocked(e)) => {
            info!("[TRANSITION] Staying in current dungeon ({})", e);
        }
        Some(TransitionOutcome::Cancelled) | None => {}
    }
}
