//! Sprite rendering for the board.
//!
//! The editor keeps fixed-point world positions with y pointing down. Bevy
//! has y pointing up, so every conversion goes through [`to_bevy`] and
//! [`to_editor`].

use bevy::prelude::*;
use tilewright_core::footprint::Footprint;
use tilewright_core::grid::{cell_center, GridCell};
use tilewright_core::host::MarkerKind;
use tilewright_core::math::Vec2Fixed;

use crate::editor::{ClientEditor, LevelEditor};

/// A sprite mirroring one piece of editor state.
///
/// All of them are despawned and rebuilt whenever the editor changes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSprite {
    /// A navigation cell.
    Nav,
    /// A placed tile.
    Tile,
    /// One cell of an obstacle instance.
    Obstacle,
    /// A selection or destination marker.
    Marker(MarkerKind),
    /// The goal marker.
    Goal,
}

impl BoardSprite {
    /// Draw order.
    pub fn z(self) -> f32 {
        match self {
            Self::Nav => 0.0,
            Self::Tile => 1.0,
            Self::Obstacle => 2.0,
            Self::Goal => 3.0,
            Self::Marker(_) => 4.0,
        }
    }

    /// Fill color. Tiles are colored by source id via [`source_color`].
    pub fn color(self) -> Color {
        match self {
            Self::Nav => Color::srgba(0.2, 0.5, 0.9, 0.25),
            Self::Tile => source_color(0),
            Self::Obstacle => Color::srgb(0.55, 0.35, 0.2),
            Self::Marker(MarkerKind::Hover) => Color::srgba(1.0, 1.0, 0.0, 0.35),
            Self::Marker(MarkerKind::Target) => Color::srgba(0.0, 1.0, 0.0, 0.35),
            Self::Marker(MarkerKind::Blocked) => Color::srgba(1.0, 0.0, 0.0, 0.45),
            Self::Goal => Color::srgb(1.0, 0.84, 0.0),
        }
    }
}

/// Tile color for a tileset source.
pub fn source_color(source_id: i32) -> Color {
    match source_id {
        0 => Color::srgb(0.45, 0.45, 0.5),
        3 => Color::srgb(0.85, 0.45, 0.15),
        other => Color::hsl((other as f32 * 47.0).rem_euclid(360.0), 0.5, 0.5),
    }
}

/// Editor world position to Bevy world position.
pub fn to_bevy(world: Vec2Fixed) -> Vec2 {
    let (x, y) = world.to_f32();
    Vec2::new(x, -y)
}

/// Bevy world position to editor world position.
pub fn to_editor(world: Vec2) -> Vec2Fixed {
    Vec2Fixed::from_f32(world.x, -world.y)
}

/// World centers of the cells an obstacle instance at `position` covers.
///
/// Inverts the placement rule: the instance sits at the anchor cell's center
/// shifted by the footprint centroid.
pub fn obstacle_cell_centers(
    footprint: &Footprint,
    position: Vec2Fixed,
    tile_size: Vec2Fixed,
) -> Vec<Vec2Fixed> {
    let anchor_center = position - tile_size.mul_components(footprint.centroid());
    footprint
        .offsets()
        .iter()
        .map(|offset| anchor_center + tile_size.mul_components(offset.as_vec2()))
        .collect()
}

fn spawn_sprite(
    commands: &mut Commands,
    kind: BoardSprite,
    center: Vec2,
    size: Vec2,
    color: Color,
) {
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation(center.extend(kind.z())),
            ..default()
        },
        kind,
    ));
}

/// Everything to draw for the editor's current state, as
/// `(kind, center, size, color)`.
pub fn board_sprites(editor: &ClientEditor) -> Vec<(BoardSprite, Vec2, Vec2, Color)> {
    let tile_size = editor.config().tile_size;
    let (w, h) = tile_size.to_f32();
    let cell_size = Vec2::new(w, h);
    let center = |cell: GridCell| to_bevy(cell_center(cell, tile_size));

    let mut sprites = Vec::new();

    for (cell, _) in editor.nav().iter() {
        sprites.push((BoardSprite::Nav, center(cell), cell_size, BoardSprite::Nav.color()));
    }
    for (cell, record) in editor.tiles().iter() {
        sprites.push((
            BoardSprite::Tile,
            center(cell),
            cell_size,
            source_color(record.source_id),
        ));
    }

    let anchor_only = Footprint::anchor_only();
    for (_, instance) in editor.host().instances.iter() {
        let footprint = editor
            .templates()
            .get(&instance.template)
            .filter(|footprint| !footprint.is_empty())
            .unwrap_or(&anchor_only);
        for world in obstacle_cell_centers(footprint, instance.position, tile_size) {
            sprites.push((
                BoardSprite::Obstacle,
                to_bevy(world),
                cell_size,
                BoardSprite::Obstacle.color(),
            ));
        }
    }

    let goal = editor.goal();
    let (gw, gh) = goal.size.to_f32();
    sprites.push((
        BoardSprite::Goal,
        to_bevy(goal.position),
        Vec2::new(gw, gh),
        BoardSprite::Goal.color(),
    ));

    for &(kind, cell) in editor.host().markers.markers() {
        let sprite = BoardSprite::Marker(kind);
        sprites.push((sprite, center(cell), cell_size, sprite.color()));
    }

    sprites
}

/// Rebuilds every [`BoardSprite`] from the editor.
pub(crate) fn sync_board_sprites(
    mut commands: Commands,
    editor: Res<LevelEditor>,
    existing: Query<Entity, With<BoardSprite>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let sprites = board_sprites(&editor);
    tracing::trace!(count = sprites.len(), "Rebuilding board sprites");
    for (kind, center, size, color) in sprites {
        spawn_sprite(&mut commands, kind, center, size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewright_core::grid::default_tile_size;

    #[test]
    fn test_coordinate_round_trip_flips_y() {
        let world = Vec2Fixed::from_ints(12, 20);
        assert_eq!(to_bevy(world), Vec2::new(12.0, -20.0));
        assert_eq!(to_editor(Vec2::new(12.0, -20.0)), world);
    }

    #[test]
    fn test_obstacle_cells_follow_footprint() {
        let footprint = Footprint::new([GridCell::ZERO, GridCell::new(1, 0)]);
        // Anchor (2, 2) at 8x8: center (20, 20), shifted by half a tile.
        let position = Vec2Fixed::from_ints(24, 20);
        let centers = obstacle_cell_centers(&footprint, position, default_tile_size());
        assert_eq!(
            centers,
            vec![Vec2Fixed::from_ints(20, 20), Vec2Fixed::from_ints(28, 20)]
        );
    }

    #[test]
    fn test_known_sources_have_fixed_colors() {
        assert_eq!(source_color(3), Color::srgb(0.85, 0.45, 0.15));
        assert_ne!(source_color(5), source_color(6));
    }
}
