//! # Tilewright Game
//!
//! Game client for the tile editor.
//!
//! This crate drives the editor from `tilewright_core` with Bevy for
//! rendering, input and the HUD. The editor itself lives in a single
//! [`editor::LevelEditor`] resource; everything else mirrors or feeds it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use bevy::log::LogPlugin;
use bevy::prelude::*;

pub mod camera;
pub mod data_loader;
pub mod editor;
pub mod input;
pub mod plugins;
pub mod render;
pub mod ui;

pub use data_loader::{LevelDataPlugin, LevelSource};
pub use editor::{EditorPlugin, EditorSyncPlugin, LevelEditor};
pub use plugins::GamePlugins;

/// Run the game with the level named by `source`.
///
/// # Errors
///
/// Returns an error if the game fails to initialize.
pub fn run(source: LevelSource) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Tilewright".into(),
                    resolution: (1280.0, 720.0).into(),
                    ..default()
                }),
                ..default()
            })
            .disable::<LogPlugin>(), // Logging already initialized in main.rs
    );

    app.insert_resource(source);
    app.add_plugins(GamePlugins);
    app.insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.1)));

    #[cfg(feature = "dev-tools")]
    {
        tracing::info!("Development tools enabled");
    }

    app.run();

    Ok(())
}
