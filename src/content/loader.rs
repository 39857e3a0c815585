//! Loader for RON content files at startup.

use bevy::prelude::*;
use ron::Options;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::*;
use super::registry::ContentRegistry;
use super::template::{BindingTable, PropBinding, PuzzleTemplateSet, Template, TemplateSet};

/// Error type for content loading failures.
#[derive(Debug, Error)]
#[error("Failed to load {file}: {message}")]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a RON document, tagging errors with `file_name`.
pub(crate) fn parse_ron<T>(file_name: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single RON struct (not wrapped in DataFile).
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_ron(&file_name, &contents)
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    load_single_file::<DataFile<T>>(path).map(|data| data.items)
}

/// Decode one template definition. Image paths are relative to `base_path`.
pub(crate) fn resolve_template(def: &TemplateDef, base_path: &Path) -> Result<Template, String> {
    match &def.source {
        TemplateSource::Grid { legend, rows } => Template::from_rows(def.id.clone(), legend, rows),
        TemplateSource::Image { path } => Template::load_png(def.id.clone(), &base_path.join(path)),
    }
}

/// Decode every template of a set, collecting failures instead of stopping at the first.
fn resolve_template_set(
    file: &str,
    templates: &[TemplateDef],
    props: Vec<PropDef>,
    base_path: &Path,
    errors: &mut Vec<ContentLoadError>,
) -> TemplateSet {
    let mut resolved = Vec::with_capacity(templates.len());
    for def in templates {
        match resolve_template(def, base_path) {
            Ok(template) => resolved.push(template),
            Err(message) => errors.push(ContentLoadError {
                file: file.to_string(),
                message,
            }),
        }
    }

    TemplateSet {
        templates: resolved,
        bindings: BindingTable::new(props.into_iter().map(PropBinding::from).collect()),
    }
}

/// Load all content from assets/data/*.ron into a ContentRegistry.
/// Returns errors for any files that fail to load.
pub fn load_all_content(
    base_path: &Path,
) -> Result<(ContentRegistry, DungeonSettings), Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let library = load_single_file::<DungeonLibraryDef>(&base_path.join("dungeon_library.ron"))
        .map_err(|e| errors.push(e))
        .ok();

    let mut dungeons = HashMap::new();
    match load_data_file::<DungeonDef>(&base_path.join("dungeons.ron")) {
        Ok(items) => {
            for item in items {
                if dungeons.contains_key(&item.id) {
                    errors.push(ContentLoadError {
                        file: "dungeons.ron".to_string(),
                        message: format!("duplicate dungeon id '{}'", item.id),
                    });
                    continue;
                }
                dungeons.insert(item.id.clone(), item);
            }
        }
        Err(e) => errors.push(e),
    }

    let room_templates =
        match load_single_file::<TemplateSetDef>(&base_path.join("room_templates.ron")) {
            Ok(def) => resolve_template_set(
                "room_templates.ron",
                &def.templates,
                def.props,
                base_path,
                &mut errors,
            ),
            Err(e) => {
                errors.push(e);
                TemplateSet::default()
            }
        };

    let puzzle_templates =
        match load_single_file::<PuzzleTemplateSetDef>(&base_path.join("puzzle_templates.ron")) {
            Ok(def) => PuzzleTemplateSet {
                set: resolve_template_set(
                    "puzzle_templates.ron",
                    &def.templates,
                    def.props,
                    base_path,
                    &mut errors,
                ),
                difficulty: def.difficulty,
                time_limit: def.time_limit,
            },
            Err(e) => {
                errors.push(e);
                PuzzleTemplateSet::default()
            }
        };

    // Settings are optional; every field has a default.
    let settings_path = base_path.join("dungeon_settings.ron");
    let settings = if settings_path.exists() {
        match load_single_file::<DungeonSettings>(&settings_path) {
            Ok(settings) => settings,
            Err(e) => {
                errors.push(e);
                DungeonSettings::default()
            }
        }
    } else {
        debug!("[CONTENT] No dungeon_settings.ron, using defaults");
        DungeonSettings::default()
    };

    match library {
        Some(library) if errors.is_empty() => Ok((
            ContentRegistry {
                dungeons,
                levels: library.levels,
                doors: library.doors,
                room_templates,
                puzzle_templates,
            },
            settings,
        )),
        _ => Err(errors),
    }
}
