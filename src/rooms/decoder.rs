//! Rooms domain: decoding templates into prop placements on a tile sequence.

use bevy::prelude::*;
use rand::Rng;

use crate::content::{BindingMatchPolicy, BindingTable, PropBlueprint, Template, TemplateSet};
use crate::core::DungeonError;
use crate::tiles::TileSequence;

/// One prop to instantiate, already resolved to a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub name: String,
    pub blueprint: PropBlueprint,
    /// Index into the room's tile sequence.
    pub slot: usize,
    pub position: Vec3,
}

/// Result of decorating one room.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub template_id: String,
    pub placements: Vec<Placement>,
}

/// Uniform random pick from the set.
pub fn pick_template<'a, R: Rng>(
    set: &'a TemplateSet,
    rng: &mut R,
) -> Result<&'a Template, DungeonError> {
    if set.templates.is_empty() {
        return Err(DungeonError::ConfigurationMissing { what: "templates" });
    }
    Ok(&set.templates[rng.random_range(0..set.templates.len())])
}

/// Walk the template in row-major order, pairing pixel `i` with tile slot `i`.
///
/// Placements are computed for the whole template before any slot is marked,
/// so a failed decode leaves `tiles` untouched.
pub fn decode_template(
    template: &Template,
    bindings: &BindingTable,
    tiles: &mut TileSequence,
    policy: BindingMatchPolicy,
    placement_z: f32,
) -> Result<Vec<Placement>, DungeonError> {
    if bindings.is_empty() {
        return Err(DungeonError::ConfigurationMissing {
            what: "prop bindings",
        });
    }
    if template.pixel_count() != tiles.len() {
        return Err(DungeonError::AlignmentMismatch {
            template: template.id.clone(),
            pixels: template.pixel_count(),
            tiles: tiles.len(),
        });
    }

    let mut placements = Vec::new();
    for (slot, (x, y, color)) in template.pixels().enumerate() {
        let Some(tile) = tiles.get(slot) else {
            continue;
        };
        let position = tile.position.truncate().extend(placement_z);

        let matches: Vec<_> = bindings.matching(color).collect();
        let chosen = match (policy, matches.len()) {
            (_, 0) => continue,
            (BindingMatchPolicy::RejectAmbiguous, count) if count > 1 => {
                return Err(DungeonError::AmbiguousBinding {
                    x,
                    y,
                    color,
                    matches: count,
                });
            }
            (BindingMatchPolicy::InstantiateAll, _) => &matches[..],
            _ => &matches[..1],
        };

        placements.extend(chosen.iter().map(|binding| Placement {
            name: binding.name.clone(),
            blueprint: binding.blueprint.clone(),
            slot,
            position,
        }));
    }

    for placement in &placements {
        tiles.mark_unavailable(placement.slot);
    }

    debug!(
        "[DECODE] Template '{}' placed {} props, {} of {} slots free",
        template.id,
        placements.len(),
        tiles.available_count(),
        tiles.len()
    );
    Ok(placements)
}

/// Pick a template from `set` and decode it onto `tiles`.
pub fn decorate<R: Rng>(
    set: &TemplateSet,
    tiles: &mut TileSequence,
    policy: BindingMatchPolicy,
    placement_z: f32,
    rng: &mut R,
) -> Result<Decoration, DungeonError> {
    let template = pick_template(set, rng)?;
    let placements = decode_template(template, &set.bindings, tiles, policy, placement_z)?;
    Ok(Decoration {
        template_id: template.id.clone(),
        placements,
    })
}
