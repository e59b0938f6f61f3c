//! Level loading for the game client.
//!
//! Reads the level and editor config from RON files at startup and inserts
//! the [`LevelEditor`] plus what the HUD needs to describe it. All
//! validation happens at load time.

use std::path::PathBuf;

use bevy::prelude::*;
use thiserror::Error;
use tilewright_core::config::EditorConfig;
use tilewright_core::error::EditorError;
use tilewright_core::host::{HeadlessHost, TemplateId};
use tilewright_core::level::{level_dir, Level, LevelError};

use crate::editor::LevelEditor;

/// Default level shipped with the game.
pub const DEFAULT_LEVEL_PATH: &str = "assets/levels/tutorial.ron";

/// Default editor config.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/editor.ron";

/// Errors that can occur while loading a level.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Level or config file could not be read or parsed.
    #[error(transparent)]
    Level(#[from] LevelError),
    /// The editor rejected the level.
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Where to load the level from.
#[derive(Resource, Debug, Clone)]
pub struct LevelSource {
    /// Level file.
    pub level_path: PathBuf,
    /// Editor config file. A missing file falls back to defaults.
    pub config_path: Option<PathBuf>,
}

impl Default for LevelSource {
    fn default() -> Self {
        Self {
            level_path: PathBuf::from(DEFAULT_LEVEL_PATH),
            config_path: Some(PathBuf::from(DEFAULT_CONFIG_PATH)),
        }
    }
}

/// Name and number of the loaded level.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LevelInfo {
    /// Display name.
    pub name: String,
    /// Level number.
    pub number: u32,
}

/// One toolbox entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Template to place.
    pub id: TemplateId,
    /// Button label.
    pub name: String,
}

/// Obstacle templates the player may place, in level order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCatalog {
    /// Toolbox entries.
    pub entries: Vec<TemplateEntry>,
}

/// Everything a loaded level inserts into the world.
pub struct LoadedLevel {
    /// The editor.
    pub editor: LevelEditor,
    /// Level name and number.
    pub info: LevelInfo,
    /// Toolbox entries.
    pub catalog: TemplateCatalog,
}

/// Load the editor config, falling back to defaults when the file is absent.
pub fn load_config(source: &LevelSource) -> Result<EditorConfig, DataLoadError> {
    match &source.config_path {
        Some(path) => match EditorConfig::load(path) {
            Ok(config) => Ok(config),
            Err(LevelError::FileNotFound(path)) => {
                tracing::info!(%path, "No editor config, using defaults");
                Ok(EditorConfig::default())
            }
            Err(e) => Err(e.into()),
        },
        None => Ok(EditorConfig::default()),
    }
}

/// Load a level and build its editor.
///
/// # Errors
///
/// Returns an error if a file is missing or malformed, a sprite cannot be
/// decoded, or the config is invalid.
pub fn load_level(source: &LevelSource) -> Result<LoadedLevel, DataLoadError> {
    let config = load_config(source)?;
    let level = Level::load(&source.level_path)?;

    let info = LevelInfo {
        name: level.name.clone(),
        number: level.number,
    };
    let catalog = TemplateCatalog {
        entries: level
            .templates
            .iter()
            .map(|template| TemplateEntry {
                id: template.id,
                name: template.name.clone(),
            })
            .collect(),
    };

    let mut host = HeadlessHost::new();
    host.score = level.score_board();
    let editor = level.into_editor(config, host, &level_dir(&source.level_path))?;

    Ok(LoadedLevel {
        editor: LevelEditor(editor),
        info,
        catalog,
    })
}

/// Plugin that loads the level named by [`LevelSource`] at startup.
pub struct LevelDataPlugin;

impl Plugin for LevelDataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelSource>()
            .add_systems(Startup, load_level_on_startup);
    }
}

fn load_level_on_startup(mut commands: Commands, source: Res<LevelSource>) {
    match load_level(&source) {
        Ok(loaded) => {
            tracing::info!(
                level = %loaded.info.name,
                templates = loaded.catalog.entries.len(),
                "Level loaded"
            );
            commands.insert_resource(loaded.editor);
            commands.insert_resource(loaded.info);
            commands.insert_resource(loaded.catalog);
        }
        Err(e) => {
            tracing::error!(
                path = %source.level_path.display(),
                error = %e,
                "Failed to load level"
            );
        }
    }
}
