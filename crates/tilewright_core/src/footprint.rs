//! Obstacle footprints.
//!
//! A footprint is the list of cell offsets, relative to the anchor cell under
//! the cursor, that an obstacle covers. It is either given explicitly or
//! derived from the visible pixels of the obstacle's sprite.

use image::{DynamicImage, GenericImageView, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::grid::{world_to_cell, GridCell};
use crate::math::{Fixed, Vec2Fixed};

/// Default opacity threshold for footprint extraction.
pub const DEFAULT_ALPHA_THRESHOLD: f32 = 0.1;

/// Anything with a per-pixel opacity channel.
pub trait AlphaSource {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Opacity of pixel `(x, y)` in `[0, 1]`.
    fn alpha(&self, x: u32, y: u32) -> f32;
}

impl AlphaSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn alpha(&self, x: u32, y: u32) -> f32 {
        f32::from(self.get_pixel(x, y).0[3]) / 255.0
    }
}

impl AlphaSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn alpha(&self, x: u32, y: u32) -> f32 {
        f32::from(self.get_pixel(x, y).0[3]) / 255.0
    }
}

/// Largest offset magnitude, in cells, a placeable footprint may have.
pub const MAX_FOOTPRINT_OFFSET: u32 = 1 << 12;

/// Cell offsets covered by one obstacle, in first-seen order, no duplicates.
///
/// Fixed once placement of an instance begins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Footprint(Vec<GridCell>);

impl Footprint {
    /// Build from explicit offsets, dropping duplicates but keeping order.
    #[must_use]
    pub fn new(offsets: impl IntoIterator<Item = GridCell>) -> Self {
        let mut cells = Vec::new();
        for offset in offsets {
            if !cells.contains(&offset) {
                cells.push(offset);
            }
        }
        Self(cells)
    }

    /// Footprint covering only the anchor cell.
    #[must_use]
    pub fn anchor_only() -> Self {
        Self(vec![GridCell::ZERO])
    }

    /// Offsets in order.
    #[must_use]
    pub fn offsets(&self) -> &[GridCell] {
        &self.0
    }

    /// Number of covered cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the footprint covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest absolute offset component. Zero for an empty footprint.
    #[must_use]
    pub fn extent(&self) -> u32 {
        self.0
            .iter()
            .map(|offset| offset.x.unsigned_abs().max(offset.y.unsigned_abs()))
            .max()
            .unwrap_or(0)
    }

    /// Absolute cells when anchored at `anchor`.
    pub fn cells_at(&self, anchor: GridCell) -> impl Iterator<Item = GridCell> + '_ {
        self.0.iter().map(move |offset| anchor + *offset)
    }

    /// Mean offset in cell units. Zero for an empty footprint.
    #[must_use]
    pub fn centroid(&self) -> Vec2Fixed {
        if self.0.is_empty() {
            return Vec2Fixed::ZERO;
        }
        let sum = self
            .0
            .iter()
            .fold(Vec2Fixed::ZERO, |acc, offset| acc + offset.as_vec2());
        sum.div_scalar(Fixed::from_num(self.0.len()))
    }
}

/// What to do with a template whose sprite has no visible pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyFootprintPolicy {
    /// Treat it as covering only the anchor cell.
    #[default]
    AnchorOnly,
    /// Refuse to start placing it.
    Reject,
}

impl EmptyFootprintPolicy {
    /// Apply the policy. `None` means the footprint was rejected.
    #[must_use]
    pub fn resolve(self, footprint: Footprint) -> Option<Footprint> {
        if !footprint.is_empty() {
            return Some(footprint);
        }
        match self {
            Self::AnchorOnly => Some(Footprint::anchor_only()),
            Self::Reject => None,
        }
    }
}

/// Scan an image's opacity channel and collect the cells of every pixel whose
/// alpha exceeds `alpha_threshold`.
///
/// No image, or a fully transparent one, yields an empty footprint.
#[must_use]
pub fn extract_footprint<S: AlphaSource + ?Sized>(
    image: Option<&S>,
    tile_size: Vec2Fixed,
    alpha_threshold: f32,
) -> Footprint {
    let Some(image) = image else {
        return Footprint::default();
    };

    let (width, height) = image.dimensions();
    let mut cells = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if image.alpha(x, y) <= alpha_threshold {
                continue;
            }
            let pixel = Vec2Fixed::new(
                Fixed::saturating_from_num(x),
                Fixed::saturating_from_num(y),
            );
            let cell = world_to_cell(pixel, tile_size);
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
    }

    tracing::debug!(cells = cells.len(), width, height, "Extracted footprint");
    Footprint(cells)
}
