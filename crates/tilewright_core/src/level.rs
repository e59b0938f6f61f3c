//! Level files.
//!
//! A level describes both layers, where the goal starts and which obstacle
//! templates the player may place. Levels are RON files so they can be edited
//! by hand.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Goal;
use crate::config::EditorConfig;
use crate::editor::TileEditor;
use crate::error::{EditorError, Result};
use crate::footprint::{extract_footprint, Footprint};
use crate::host::{EditorHost, TemplateId};
use crate::layer::SparseLayer;
use crate::math::Vec2Fixed;
use crate::score::{LevelRequirement, ScoreBoard};

/// Error type for level and config loading.
#[derive(Error, Debug)]
pub enum LevelError {
    /// File not found.
    #[error("Level file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read level file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse level: {0}")]
    ParseError(#[from] ron::error::SpannedError),
}

/// Starting position and size of the goal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSpec {
    /// World position of the marker's center.
    pub position: Vec2Fixed,
    /// Hit box of the marker.
    #[serde(default = "default_goal_size")]
    pub size: Vec2Fixed,
}

fn default_goal_size() -> Vec2Fixed {
    crate::grid::default_tile_size()
}

impl From<GoalSpec> for Goal {
    fn from(spec: GoalSpec) -> Self {
        Goal::new(spec.position, spec.size)
    }
}

/// An obstacle the player can place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleTemplateSpec {
    /// Identifier used by the editor and the history.
    pub id: TemplateId,
    /// Display name for the toolbox.
    pub name: String,
    /// Explicit footprint; wins over the sprite.
    #[serde(default)]
    pub footprint: Option<Footprint>,
    /// Sprite whose opaque pixels define the footprint, relative to the level file.
    #[serde(default)]
    pub image: Option<String>,
}

/// A complete level definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level name.
    pub name: String,
    /// Level number used for score requirements.
    #[serde(default = "default_level_number")]
    pub number: u32,
    /// Minimum moves the level can be solved with.
    #[serde(default)]
    pub requirement: LevelRequirement,
    /// Placed tiles.
    pub tiles: SparseLayer,
    /// Navigation cells.
    pub nav: SparseLayer,
    /// Goal marker.
    pub goal: GoalSpec,
    /// Placeable obstacles.
    #[serde(default)]
    pub templates: Vec<ObstacleTemplateSpec>,
}

fn default_level_number() -> u32 {
    1
}

impl Level {
    /// Load a level from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, LevelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LevelError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let level: Level = ron::from_str(&contents)?;
        tracing::info!(name = %level.name, path = %path.display(), "Level loaded");
        Ok(level)
    }

    /// Load from a RON string (useful for embedded levels).
    pub fn from_ron_str(ron: &str) -> std::result::Result<Self, LevelError> {
        let level: Level = ron::from_str(ron)?;
        Ok(level)
    }

    /// Footprint of every template.
    ///
    /// An explicit footprint is used as is. Otherwise the sprite at `image`
    /// (relative to `base_dir`) is scanned. A template with neither gets an
    /// empty footprint, which the editor's policy resolves later.
    pub fn template_footprints(
        &self,
        base_dir: &Path,
        config: &EditorConfig,
    ) -> Result<Vec<(TemplateId, Footprint)>> {
        self.templates
            .iter()
            .map(|template| {
                let footprint = match (&template.footprint, &template.image) {
                    (Some(footprint), _) => footprint.clone(),
                    (None, Some(image)) => {
                        let sprite = load_sprite(&base_dir.join(image))?;
                        extract_footprint(Some(&sprite), config.tile_size, config.alpha_threshold)
                    }
                    (None, None) => Footprint::default(),
                };
                Ok((template.id, footprint))
            })
            .collect()
    }

    /// Score board for this level's number and requirement.
    #[must_use]
    pub fn score_board(&self) -> ScoreBoard {
        let mut score = ScoreBoard::new();
        score.current_level = self.number;
        score.set_requirement(self.number, self.requirement);
        score
    }

    /// Build an editor for this level with every template registered.
    pub fn into_editor<H: EditorHost>(
        self,
        config: EditorConfig,
        host: H,
        base_dir: &Path,
    ) -> Result<TileEditor<SparseLayer, H>> {
        let footprints = self.template_footprints(base_dir, &config)?;
        let mut editor = TileEditor::new(config, self.tiles, self.nav, self.goal.into(), host)?;
        for (id, footprint) in footprints {
            editor.register_template_footprint(id, footprint);
        }
        Ok(editor)
    }
}

/// Decode a sprite into RGBA.
pub fn load_sprite(path: &Path) -> Result<image::RgbaImage> {
    let decoded = image::open(path).map_err(|source| EditorError::Image {
        path: path.display().to_string(),
        source,
    })?;
    Ok(decoded.to_rgba8())
}

/// Directory a level file's relative paths resolve against.
#[must_use]
pub fn level_dir(path: &Path) -> PathBuf {
    path.parent().map_or_else(PathBuf::new, Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridCell;
    use crate::layer::TileLayer;

    const LEVEL: &str = r#"(
        name: "Two bricks",
        tiles: [
            (cell: (x: 2, y: 2), source_id: 3),
            (cell: (x: 3, y: 2), source_id: 0, atlas: (x: 1, y: 0)),
        ],
        nav: [
            (cell: (x: 2, y: 2), source_id: 0),
            (cell: (x: 5, y: 5), source_id: 0),
        ],
        goal: (position: (x: 44.0, y: 4.0)),
        templates: [
            (id: 1, name: "Drum", footprint: Some([(x: 0, y: 0), (x: 1, y: 0)])),
            (id: 2, name: "Crate"),
        ],
    )"#;

    #[test]
    fn test_parse_level() {
        let level = Level::from_ron_str(LEVEL).unwrap();
        assert_eq!(level.name, "Two bricks");
        assert_eq!(level.number, 1);
        assert_eq!(level.tiles.len(), 2);
        assert_eq!(level.nav.source_id(GridCell::new(5, 5)), 0);
        assert_eq!(level.goal.size, Vec2Fixed::from_ints(8, 8));
        assert_eq!(level.templates.len(), 2);
    }

    #[test]
    fn test_template_footprints_without_images() {
        let level = Level::from_ron_str(LEVEL).unwrap();
        let footprints = level
            .template_footprints(Path::new("."), &EditorConfig::default())
            .unwrap();
        assert_eq!(footprints[0].0, TemplateId(1));
        assert_eq!(footprints[0].1.len(), 2);
        assert!(footprints[1].1.is_empty());
    }

    #[test]
    fn test_missing_sprite_is_an_error() {
        let mut level = Level::from_ron_str(LEVEL).unwrap();
        level.templates[1].image = Some("does-not-exist.png".to_string());
        let result = level.template_footprints(Path::new("."), &EditorConfig::default());
        assert!(matches!(result, Err(EditorError::Image { .. })));
    }

    #[test]
    fn test_score_board_uses_level_requirement() {
        let mut level = Level::from_ron_str(LEVEL).unwrap();
        level.number = 4;
        level.requirement = LevelRequirement {
            min_bricks: 1,
            min_objects: 1,
        };
        let mut score = level.score_board();
        assert_eq!(score.current_level, 4);

        // Two brick moves exceed a one-brick requirement but stay under three times it.
        score.register_gold_collect(100);
        crate::host::ScoreSink::register_brick_move(&mut score, 2);
        assert_eq!(score.score, 126);
    }

    #[test]
    fn test_missing_file() {
        let result = Level::load("no/such/level.ron");
        assert!(matches!(result, Err(LevelError::FileNotFound(_))));
    }

    #[test]
    fn test_into_editor_shadows_nav_under_tiles() {
        let level = Level::from_ron_str(LEVEL).unwrap();
        let editor = level
            .into_editor(
                EditorConfig::default(),
                crate::host::HeadlessHost::new(),
                Path::new("."),
            )
            .unwrap();
        assert!(!editor.nav().is_occupied(GridCell::new(2, 2)));
        assert!(editor.shadow().is_shadowed(GridCell::new(2, 2)));
    }
}
