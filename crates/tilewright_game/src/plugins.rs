//! Game plugins for Bevy.
//!
//! Aggregates the client plugins into a single registration point.

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

use crate::camera::CameraPlugin;
use crate::data_loader::LevelDataPlugin;
use crate::editor::EditorPlugin;
use crate::ui::HudPlugin;

// ============================================================================
// Plugin Group
// ============================================================================

/// Main plugin group containing all game client plugins.
///
/// # Example
/// ```ignore
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(GamePlugins)
///     .run();
/// ```
pub struct GamePlugins;

impl PluginGroup for GamePlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(LevelDataPlugin) // Load the level first
            .add(CameraPlugin)
            .add(EditorPlugin)
            .add(HudPlugin)
    }
}
