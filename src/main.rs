mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod player;
mod progression;
mod rooms;
mod tiles;

use avian2d::prelude::*;
use bevy::log::LogPlugin;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Centinela".to_string(),
                    resolution: (1280, 720).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: "info,wgpu=error,naga=warn,centinela=debug".to_string(),
                ..default()
            }),
    )
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(Gravity(Vec2::ZERO))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        player::PlayerPlugin,
        rooms::RoomsPlugin,
        progression::ProgressionPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
