//! Validation for cross-references and invariants between content definitions.

use std::collections::HashSet;
use thiserror::Error;

use super::data::*;
use super::registry::ContentRegistry;
use super::template::TemplateSet;

/// A validation finding with context about what failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{source_type} '{source_id}' references missing {target_type} '{missing_id}' in field '{field}'")]
    MissingReference {
        source_type: &'static str,
        source_id: String,
        field: &'static str,
        target_type: &'static str,
        missing_id: String,
    },

    #[error("{what} is empty")]
    Empty { what: String },

    #[error("{set} binds color {color} to both '{first}' and '{second}'")]
    DuplicateBindingColor {
        set: &'static str,
        color: String,
        first: String,
        second: String,
    },

    #[error("dungeon '{dungeon}' declares room '{room}' more than once")]
    DuplicateRoomId { dungeon: String, room: String },

    #[error("dungeon '{dungeon}' has no entrance room")]
    NoEntrance { dungeon: String },

    #[error("room '{room}' in dungeon '{dungeon}' has {tiles} tiles but template '{template}' has {pixels} pixels")]
    TemplateSizeMismatch {
        dungeon: String,
        room: String,
        tiles: usize,
        template: String,
        pixels: usize,
    },
}

/// Helper macro for checking a reference exists
macro_rules! check_ref {
    ($errors:expr, $registry_map:expr, $source_type:expr, $source_id:expr, $field:expr, $target_type:expr, $ref_id:expr) => {
        if !$registry_map.contains_key($ref_id) {
            $errors.push(ValidationError::MissingReference {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                target_type: $target_type,
                missing_id: $ref_id.to_string(),
            });
        }
    };
}

fn check_bindings(errors: &mut Vec<ValidationError>, set_name: &'static str, set: &TemplateSet) {
    if set.is_empty() {
        errors.push(ValidationError::Empty {
            what: format!("{set_name} template list"),
        });
    }
    if set.bindings.is_empty() {
        errors.push(ValidationError::Empty {
            what: format!("{set_name} prop list"),
        });
    }

    let bindings: Vec<_> = set.bindings.iter().collect();
    for (index, binding) in bindings.iter().enumerate() {
        if let Some(earlier) = bindings[..index]
            .iter()
            .find(|other| other.color == binding.color)
        {
            errors.push(ValidationError::DuplicateBindingColor {
                set: set_name,
                color: binding.color.to_string(),
                first: earlier.name.clone(),
                second: binding.name.clone(),
            });
        }
    }
}

/// Every template a room may draw must line up with the room's tile count.
fn check_alignment(
    errors: &mut Vec<ValidationError>,
    dungeon: &DungeonDef,
    room: &RoomDef,
    set: &TemplateSet,
) {
    let tiles = room.occupied_cells();
    for template in &set.templates {
        if template.pixel_count() != tiles {
            errors.push(ValidationError::TemplateSizeMismatch {
                dungeon: dungeon.id.clone(),
                room: room.id.clone(),
                tiles,
                template: template.id.clone(),
                pixels: template.pixel_count(),
            });
        }
    }
}

/// Validate all cross-references in the registry.
/// Returns a list of validation errors, empty if all content is consistent.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if registry.levels.is_empty() {
        errors.push(ValidationError::Empty {
            what: "level catalog".to_string(),
        });
    }

    // Validate levels
    for (index, level) in registry.levels.iter().enumerate() {
        let level_id = format!("{index}:{}", level.name);
        if level.dungeons.is_empty() {
            errors.push(ValidationError::Empty {
                what: format!("level '{level_id}'"),
            });
        }
        for dungeon_id in &level.dungeons {
            check_ref!(
                errors,
                registry.dungeons,
                "Level",
                level_id,
                "dungeons",
                "Dungeon",
                dungeon_id
            );
        }
    }

    // Validate dungeons, sorted so findings come out in a stable order
    let mut dungeon_ids: Vec<_> = registry.dungeons.keys().collect();
    dungeon_ids.sort();
    for id in dungeon_ids {
        let Some(dungeon) = registry.dungeons.get(id) else {
            continue;
        };
        if dungeon.entrance().is_none() {
            errors.push(ValidationError::NoEntrance {
                dungeon: dungeon.id.clone(),
            });
        }

        let mut room_ids = HashSet::new();
        for room in &dungeon.rooms {
            if !room_ids.insert(room.id.as_str()) {
                errors.push(ValidationError::DuplicateRoomId {
                    dungeon: dungeon.id.clone(),
                    room: room.id.clone(),
                });
            }
            match room.room_type {
                RoomType::Free | RoomType::Entrance => {}
                RoomType::Puzzle => {
                    check_alignment(&mut errors, dungeon, room, &registry.puzzle_templates.set)
                }
                RoomType::Enemy | RoomType::Boss => {
                    check_alignment(&mut errors, dungeon, room, &registry.room_templates)
                }
            }
        }
    }

    check_bindings(&mut errors, "room templates", &registry.room_templates);
    check_bindings(
        &mut errors,
        "puzzle templates",
        &registry.puzzle_templates.set,
    );

    errors
}
