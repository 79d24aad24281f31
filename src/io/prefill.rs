//! Pinned tiles applied before generation starts

use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::spatial::TileType;
use std::collections::HashMap;
use std::path::Path;

/// Single pinned tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefillPlacement {
    /// Map coordinates `[x, y]`
    pub position: [usize; 2],
    /// Tile the cell must hold
    pub tile: TileType,
}

/// Tiles fixed in place before the solver makes any choice
///
/// Pins are propagated once up front and are never undone by backtracking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefillData {
    placements: Vec<PrefillPlacement>,
}

impl PrefillData {
    /// Create an empty set of pins
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `tile` at `(x, y)`
    pub fn push(&mut self, x: usize, y: usize, tile: TileType) {
        self.placements.push(PrefillPlacement {
            position: [x, y],
            tile,
        });
    }

    /// Water around the whole border and a stone peak in the centre
    pub fn island(width: usize, height: usize) -> Self {
        let mut prefill = Self::new();
        if width == 0 || height == 0 {
            return prefill;
        }

        for x in 0..width {
            prefill.push(x, 0, TileType::Water);
            prefill.push(x, height - 1, TileType::Water);
        }
        for y in 0..height {
            prefill.push(0, y, TileType::Water);
            prefill.push(width - 1, y, TileType::Water);
        }
        prefill.push(width / 2, height / 2, TileType::Stone);
        prefill
    }

    /// Parse a prefill PNG, pinning every pixel that matches a palette colour
    ///
    /// Pixel `(x, y)` pins cell `(x, y)`. All other pixels are left free.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The PNG file cannot be loaded
    /// - The image contains no palette colours
    pub fn from_png(path: &Path, palette: &[[u8; 4]; TileType::COUNT]) -> Result<Self> {
        let img = image::open(path).map_err(|e| GenerationError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;

        let rgba_img = img.to_rgba8();

        // Build reverse mapping from color to tile
        let color_to_tile: HashMap<[u8; 4], TileType> = TileType::ALL
            .into_iter()
            .filter_map(|tile| palette.get(tile.index()).map(|&color| (color, tile)))
            .collect();

        let mut prefill = Self::new();
        for (x, y, pixel) in rgba_img.enumerate_pixels() {
            if let Some(&tile) = color_to_tile.get(&pixel.0) {
                prefill.push(x as usize, y as usize, tile);
            }
        }

        if prefill.is_empty() {
            return Err(invalid_parameter(
                "prefill",
                &path.display(),
                &"image contains no tile palette colours",
            ));
        }

        Ok(prefill)
    }

    /// Every pin in insertion order
    pub fn placements(&self) -> &[PrefillPlacement] {
        &self.placements
    }

    /// Number of pins
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Test whether there are no pins
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
