//! Progression domain: tests for catalog stepping, the controller, transitions, and fades.

use bevy::prelude::*;
use std::time::Duration;

use super::*;
use crate::content::{
    DoorAnchorsDef, DoorBlueprintDef, DoorCatalogDef, LevelDef, PropColor, RoomType,
    TransitionSettings, Vec2Def,
};
use crate::core::DungeonError;
use crate::rooms::{DoorSet, Room, RoomState};
use crate::tiles::TileSequence;

fn catalog(levels: &[&[&str]]) -> LevelCatalog {
    LevelCatalog::new(
        levels
            .iter()
            .enumerate()
            .map(|(index, dungeons)| Level {
                name: format!("level {index}"),
                dungeons: dungeons.iter().map(|id| id.to_string()).collect(),
            })
            .collect(),
    )
}

fn dungeon(id: &str, with_entrance: bool) -> ActiveDungeon {
    let mut rooms = vec![RoomSummary {
        entity: Entity::PLACEHOLDER,
        id: "hall".into(),
        room_type: RoomType::Enemy,
        position: Vec2::new(50.0, 0.0),
    }];
    if with_entrance {
        rooms.push(RoomSummary {
            entity: Entity::PLACEHOLDER,
            id: "start".into(),
            room_type: RoomType::Entrance,
            position: Vec2::new(-20.0, 10.0),
        });
    }
    ActiveDungeon {
        entity: Entity::PLACEHOLDER,
        blueprint_id: id.into(),
        rooms,
    }
}

fn locking_room() -> Room {
    let blueprint = DoorBlueprintDef {
        size: Vec2Def { x: 32.0, y: 8.0 },
        open_tint: PropColor::rgb(0, 255, 0),
        closed_tint: PropColor::rgb(255, 0, 0),
    };
    let catalog = DoorCatalogDef {
        north: blueprint.clone(),
        south: blueprint.clone(),
        east: blueprint.clone(),
        west: blueprint,
    };
    let anchors = DoorAnchorsDef {
        north: vec![Vec2Def { x: 0.0, y: 40.0 }],
        south: vec![Vec2Def { x: 0.0, y: -40.0 }],
        east: vec![],
        west: vec![Vec2Def { x: -40.0, y: 0.0 }],
    };
    Room::new(
        "hall",
        RoomType::Enemy,
        TileSequence::default(),
        DoorSet::build(&anchors, &catalog),
    )
}

// -----------------------------------------------------------------------------
// Catalog tests
// -----------------------------------------------------------------------------

#[test]
fn test_catalog_steps_through_level_then_next_level() {
    let catalog = catalog(&[&["a", "b"], &["c"]]);

    let first = catalog.next(DungeonCursor::new(0, 0)).unwrap();
    assert_eq!(first, DungeonCursor::new(0, 1));
    let second = catalog.next(first).unwrap();
    assert_eq!(second, DungeonCursor::new(1, 0));
    assert_eq!(catalog.blueprint_id(second).unwrap(), "c");
}

#[test]
fn test_catalog_reports_exhaustion_past_last_level() {
    let catalog = catalog(&[&["a", "b"], &["c"]]);
    assert_eq!(
        catalog.next(DungeonCursor::new(1, 0)),
        Err(DungeonError::ProgressionExhausted { level: 2, levels: 2 })
    );
}

#[test]
fn test_catalog_blueprint_lookup_out_of_range() {
    let catalog = catalog(&[&["a"], &[]]);
    assert!(matches!(
        catalog.blueprint_id(DungeonCursor::new(5, 0)),
        Err(DungeonError::ProgressionExhausted { .. })
    ));
    assert!(matches!(
        catalog.blueprint_id(DungeonCursor::new(1, 0)),
        Err(DungeonError::ConfigurationMissing { .. })
    ));
}

#[test]
fn test_catalog_from_defs_keeps_order() {
    let defs = vec![
        LevelDef {
            name: "Crypt".into(),
            dungeons: vec!["x".into(), "y".into()],
        },
        LevelDef {
            name: "Vault".into(),
            dungeons: vec!["z".into()],
        },
    ];
    let catalog = LevelCatalog::from_defs(&defs);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.level(1).unwrap().name, "Vault");
    assert_eq!(catalog.blueprint_id(DungeonCursor::new(0, 1)).unwrap(), "y");
}

// -----------------------------------------------------------------------------
// LevelProgression tests
// -----------------------------------------------------------------------------

#[test]
fn test_advance_dungeon_walks_the_catalog() {
    let mut progression = LevelProgression::new(catalog(&[&["a", "b"], &["c"]]));
    assert_eq!(progression.cursor(), DungeonCursor::new(0, 0));

    assert_eq!(progression.advance_dungeon().unwrap(), DungeonCursor::new(0, 1));
    assert_eq!(progression.advance_dungeon().unwrap(), DungeonCursor::new(1, 0));
}

#[test]
fn test_advance_dungeon_at_end_leaves_indices_unchanged() {
    let mut progression = LevelProgression::new(catalog(&[&["a", "b"], &["c"]]));
    progression.advance_dungeon().unwrap();
    progression.advance_dungeon().unwrap();

    let result = progression.advance_dungeon();
    assert!(matches!(
        result,
        Err(DungeonError::ProgressionExhausted { .. })
    ));
    assert_eq!(progression.cursor(), DungeonCursor::new(1, 0));
}

#[test]
fn test_plan_advance_does_not_mutate_until_commit() {
    let mut progression = LevelProgression::new(catalog(&[&["a", "b"]]));
    assert_eq!(progression.current_plan().unwrap().blueprint_id, "a");

    let plan = progression.plan_advance().unwrap();
    assert_eq!(plan.blueprint_id, "b");
    assert_eq!(progression.cursor(), DungeonCursor::new(0, 0));

    progression.commit(&plan);
    assert_eq!(progression.cursor(), DungeonCursor::new(0, 1));
}

#[test]
fn test_locate_entrance_finds_entrance_room() {
    let mut progression = LevelProgression::new(catalog(&[&["a"]]));
    progression.set_active(dungeon("a", true));

    assert_eq!(progression.locate_entrance(), Ok(Vec2::new(-20.0, 10.0)));
}

#[test]
fn test_locate_entrance_reports_missing_entrance() {
    let mut progression = LevelProgression::new(catalog(&[&["a"]]));
    progression.set_active(dungeon("a", false));

    assert_eq!(
        progression.locate_entrance(),
        Err(DungeonError::MissingEntranceRoom {
            dungeon: "a".into()
        })
    );
}

#[test]
fn test_single_active_dungeon() {
    let mut progression = LevelProgression::new(catalog(&[&["a", "b"]]));
    assert!(progression.set_active(dungeon("a", true)).is_none());
    let mut room = locking_room();
    assert!(progression.accept_entry(Entity::PLACEHOLDER, Entity::PLACEHOLDER, &mut room));
    assert!(progression.current_room().is_some());

    let replaced = progression.set_active(dungeon("b", true));
    assert_eq!(replaced.map(|d| d.blueprint_id), Some("a".to_string()));
    assert!(progression.current_room().is_none());

    assert!(progression.is_active_dungeon(Entity::PLACEHOLDER));
    assert!(progression.take_active().is_some());
    assert!(!progression.is_active_dungeon(Entity::PLACEHOLDER));
    assert!(progression.active().is_none());
}

#[test]
fn test_entry_into_active_dungeon_locks_room_and_closes_doors_once() {
    let mut world = World::new();
    let root = world.spawn_empty().id();
    let room_entity = world.spawn_empty().id();

    let mut progression = LevelProgression::new(catalog(&[&["a"]]));
    progression.set_active(ActiveDungeon {
        entity: root,
        ..dungeon("a", true)
    });
    let mut room = locking_room();

    assert!(progression.accept_entry(room_entity, root, &mut room));
    assert_eq!(room.state(), RoomState::Locked);
    assert_eq!(progression.current_room(), Some(room_entity));
    assert!(room.doors().all_closed());
    assert!(room.doors().iter().all(|door| door.commands_issued() == 1));

    // A second notification for the same room changes nothing.
    assert!(!progression.accept_entry(room_entity, root, &mut room));
    assert!(room.doors().iter().all(|door| door.commands_issued() == 1));
}

#[test]
fn test_entry_from_stale_dungeon_is_dropped() {
    let mut world = World::new();
    let active_root = world.spawn_empty().id();
    let stale_root = world.spawn_empty().id();
    let room_entity = world.spawn_empty().id();

    let mut progression = LevelProgression::new(catalog(&[&["a"]]));
    progression.set_active(ActiveDungeon {
        entity: active_root,
        ..dungeon("a", true)
    });
    let mut room = locking_room();

    assert!(!progression.accept_entry(room_entity, stale_root, &mut room));
    assert_eq!(room.state(), RoomState::Unvisited);
    assert!(room.awaits_entry());
    assert!(progression.current_room().is_none());
    assert!(room.doors().iter().all(|door| door.commands_issued() == 0));
}

#[test]
fn test_entry_without_active_dungeon_is_dropped() {
    let mut progression = LevelProgression::new(catalog(&[&["a"]]));
    let mut room = locking_room();

    assert!(!progression.accept_entry(Entity::PLACEHOLDER, Entity::PLACEHOLDER, &mut room));
    assert_eq!(room.state(), RoomState::Unvisited);
}

// -----------------------------------------------------------------------------
// TransitionSequencer tests
// -----------------------------------------------------------------------------

/// Records every host call and runs the real controller underneath.
struct RecordingHost {
    calls: Vec<String>,
    progression: LevelProgression,
    known: Vec<&'static str>,
    with_entrance: bool,
    player: Option<Vec2>,
}

impl RecordingHost {
    fn new(progression: LevelProgression) -> Self {
        Self {
            calls: Vec::new(),
            progression,
            known: vec!["a", "b", "c"],
            with_entrance: true,
            player: None,
        }
    }
}

impl TransitionHost for RecordingHost {
    fn fade_to(&mut self, alpha: f32, _duration: Duration) {
        self.calls.push(format!("fade_to {alpha}"));
    }

    fn plan_next_dungeon(&mut self) -> Result<DungeonPlan, DungeonError> {
        self.calls.push("plan".into());
        let plan = self.progression.plan_advance()?;
        if !self.known.contains(&plan.blueprint_id.as_str()) {
            return Err(DungeonError::UnknownDungeon {
                id: plan.blueprint_id,
            });
        }
        Ok(plan)
    }

    fn destroy_active_dungeon(&mut self) {
        self.calls.push("destroy".into());
        self.progression.take_active();
    }

    fn advance_dungeon(&mut self, plan: &DungeonPlan) {
        self.calls.push("advance".into());
        self.progression.commit(plan);
    }

    fn create_dungeon(&mut self, plan: &DungeonPlan) {
        self.calls.push(format!("create {}", plan.blueprint_id));
        self.progression
            .set_active(dungeon(&plan.blueprint_id, self.with_entrance));
    }

    fn locate_entrance(&mut self) -> Result<Vec2, DungeonError> {
        self.calls.push("locate".into());
        self.progression.locate_entrance()
    }

    fn teleport_player(&mut self, position: Vec2) {
        self.calls.push("teleport".into());
        self.player = Some(position);
    }
}

fn transition_settings() -> TransitionSettings {
    TransitionSettings {
        fade_out_alpha: 1.0,
        fade_in_alpha: 0.0,
        fade_duration_secs: 1.5,
        swap_delay_secs: 1.5,
    }
}

fn started_host(levels: &[&[&str]]) -> RecordingHost {
    let mut progression = LevelProgression::new(catalog(levels));
    progression.set_active(dungeon("a", true));
    RecordingHost::new(progression)
}

const SECOND: Duration = Duration::from_secs(1);
const HALF: Duration = Duration::from_millis(500);

#[test]
fn test_transition_runs_steps_in_order() {
    let mut host = started_host(&[&["a", "b"]]);
    let mut sequencer = TransitionSequencer::new(transition_settings());

    assert!(sequencer.request(&mut host));
    assert_eq!(sequencer.tick(SECOND, &mut host), None);
    assert_eq!(host.calls, vec!["fade_to 1"]);

    let outcome = sequencer.tick(HALF, &mut host);
    assert_eq!(
        outcome,
        Some(TransitionOutcome::Swapped {
            plan: DungeonPlan {
                cursor: DungeonCursor::new(0, 1),
                blueprint_id: "b".into(),
            },
            entrance_found: true,
        })
    );
    assert_eq!(
        host.calls,
        vec![
            "fade_to 1",
            "plan",
            "destroy",
            "advance",
            "create b",
            "locate",
            "teleport",
            "fade_to 0",
        ]
    );
    assert_eq!(host.player, Some(Vec2::new(-20.0, 10.0)));
    assert_eq!(host.progression.cursor(), DungeonCursor::new(0, 1));
}

#[test]
fn test_transition_is_single_flight_until_fade_in_completes() {
    let mut host = started_host(&[&["a", "b", "c"]]);
    let mut sequencer = TransitionSequencer::new(transition_settings());

    assert!(sequencer.request(&mut host));
    assert!(!sequencer.request(&mut host));

    sequencer.tick(Duration::from_secs(2), &mut host);
    assert!(matches!(sequencer.phase(), TransitionPhase::FadingIn { .. }));
    assert!(!sequencer.request(&mut host));

    sequencer.tick(SECOND, &mut host);
    assert!(!sequencer.is_idle());
    sequencer.tick(SECOND, &mut host);
    assert!(sequencer.is_idle());
    assert!(sequencer.request(&mut host));

    let fades = host.calls.iter().filter(|c| c.starts_with("fade_to")).count();
    let plans = host.calls.iter().filter(|c| *c == "plan").count();
    assert_eq!(fades, 3);
    assert_eq!(plans, 1);
}

#[test]
fn test_exhausted_progression_keeps_current_dungeon() {
    let mut host = started_host(&[&["a"]]);
    let mut sequencer = TransitionSequencer::new(transition_settings());

    sequencer.request(&mut host);
    let outcome = sequencer.tick(Duration::from_secs(2), &mut host);

    assert_eq!(
        outcome,
        Some(TransitionOutcome::Blocked(
            DungeonError::ProgressionExhausted { level: 1, levels: 1 }
        ))
    );
    assert_eq!(host.calls, vec!["fade_to 1", "plan", "fade_to 0"]);
    assert_eq!(host.progression.active().unwrap().blueprint_id, "a");
    assert_eq!(host.progression.cursor(), DungeonCursor::new(0, 0));
}

#[test]
fn test_unknown_blueprint_blocks_transition() {
    let mut host = started_host(&[&["a", "ghost"]]);
    let mut sequencer = TransitionSequencer::new(transition_settings());

    sequencer.request(&mut host);
    let outcome = sequencer.tick(Duration::from_secs(2), &mut host);

    assert_eq!(
        outcome,
        Some(TransitionOutcome::Blocked(DungeonError::UnknownDungeon {
            id: "ghost".into()
        }))
    );
    assert_eq!(host.progression.active().unwrap().blueprint_id, "a");
}

#[test]
fn test_missing_entrance_skips_teleport_but_completes() {
    let mut host = started_host(&[&["a", "b"]]);
    host.with_entrance = false;
    let mut sequencer = TransitionSequencer::new(transition_settings());

    sequencer.request(&mut host);
    let outcome = sequencer.tick(Duration::from_secs(2), &mut host);

    assert!(matches!(
        outcome,
        Some(TransitionOutcome::Swapped {
            entrance_found: false,
            ..
        })
    ));
    assert!(!host.calls.iter().any(|c| c == "teleport"));
    assert_eq!(host.calls.last().map(String::as_str), Some("fade_to 0"));
    assert!(host.player.is_none());
}

#[test]
fn test_cancel_before_swap_fades_back_without_swapping() {
    let mut host = started_host(&[&["a", "b"]]);
    let mut sequencer = TransitionSequencer::new(transition_settings());

    assert!(!sequencer.cancel());
    sequencer.request(&mut host);
    assert!(sequencer.cancel());

    let outcome = sequencer.tick(Duration::from_secs(2), &mut host);
    assert_eq!(outcome, Some(TransitionOutcome::Cancelled));
    assert_eq!(host.calls, vec!["fade_to 1", "fade_to 0"]);
    assert_eq!(host.progression.cursor(), DungeonCursor::new(0, 0));

    // Nothing left to cancel once fading back in.
    assert!(!sequencer.cancel());
}

#[test]
fn test_zero_delays_swap_on_first_tick() {
    let mut host = started_host(&[&["a", "b"]]);
    let mut sequencer = TransitionSequencer::new(TransitionSettings {
        fade_duration_secs: 0.0,
        swap_delay_secs: 0.0,
        ..transition_settings()
    });

    sequencer.request(&mut host);
    assert!(matches!(
        sequencer.tick(Duration::ZERO, &mut host),
        Some(TransitionOutcome::Swapped { .. })
    ));
    sequencer.tick(Duration::ZERO, &mut host);
    assert!(sequencer.is_idle());
}

// -----------------------------------------------------------------------------
// ScreenFade tests
// -----------------------------------------------------------------------------

#[test]
fn test_screen_fade_interpolates_and_lands_on_target() {
    let mut fade = ScreenFade::default();
    fade.fade_to(1.0, Duration::from_secs(2));

    fade.tick(SECOND);
    assert!((fade.alpha() - 0.5).abs() < 1e-5);
    assert!(fade.is_fading());

    fade.tick(Duration::from_secs(5));
    assert_eq!(fade.alpha(), 1.0);
    assert!(!fade.is_fading());
}

#[test]
fn test_screen_fade_starts_from_current_alpha() {
    let mut fade = ScreenFade::default();
    fade.fade_to(0.8, Duration::ZERO);
    assert_eq!(fade.alpha(), 0.8);

    fade.fade_to(0.0, Duration::from_secs(4));
    fade.tick(SECOND);
    assert!((fade.alpha() - 0.6).abs() < 1e-5);
    assert_eq!(fade.target(), 0.0);
}
