//! Content domain: RON/PNG content loading, registry, and validation.

mod data;
mod loader;
mod registry;
mod template;
mod validation;


pub use data::*;
pub use loader::{ContentLoadError, load_all_content};
pub use registry::ContentRegistry;
pub use template::{
    BindingTable, PropBinding, PropColor, PuzzleTemplateSet, Template, TemplateSet,
};
pub use validation::{ValidationError, validate_content};

use bevy::prelude::*;
use std::path::Path;

use crate::core::GameState;

pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        match load_all_content(Path::new(CONTENT_DIR)) {
            Ok((registry, settings)) => {
                info!("[CONTENT] {}", registry.summary());
                let findings = validate_content(&registry);
                for finding in &findings {
                    warn!("[CONTENT] {}", finding);
                }
                if findings.is_empty() {
                    info!("[CONTENT] All content references validated");
                }
                app.insert_resource(registry).insert_resource(settings);
            }
            Err(errors) => {
                for error in &errors {
                    error!("[CONTENT] {}", error);
                }
                error!(
                    "[CONTENT] {} content file(s) failed to load, staying in boot",
                    errors.len()
                );
                app.init_resource::<DungeonSettings>();
            }
        }

        app.add_systems(Startup, enter_run_when_loaded);
    }
}

fn enter_run_when_loaded(
    registry: Option<Res<ContentRegistry>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if registry.is_some() {
        next_state.set(GameState::Run);
    }
}
