//! Finished tile maps handed to renderers and exporters

use ndarray::Array2;
use std::fmt;

use crate::algorithm::rules::AdjacencyRuleSet;
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::spatial::grid::{Direction, Grid};
use crate::spatial::tiles::TileType;

/// Read-only view of a fully collapsed map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    /// Tiles indexed by `[row, col]`
    tiles: Array2<TileType>,
}

impl TileMap {
    /// Freeze a fully collapsed grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any cell still holds zero or several tiles
    pub fn from_grid(grid: &Grid) -> Result<Self> {
        let mut tiles = Array2::from_elem((grid.height(), grid.width()), TileType::Water);
        for ([x, y], domain) in grid.cells() {
            let tile = domain.collapsed_tile().ok_or_else(|| {
                invalid_parameter(
                    "grid",
                    &format!("cell ({x}, {y}) = {domain}"),
                    &"every cell must be collapsed",
                )
            })?;
            if let Some(slot) = tiles.get_mut([y, x]) {
                *slot = tile;
            }
        }

        Ok(Self {
            width: grid.width(),
            height: grid.height(),
            tiles,
        })
    }

    /// Rebuild a map from row-major interchange bytes
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, the length does not match,
    /// or a byte is not a tile identifier
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GenerationError::ZeroDimension { width, height });
        }
        if bytes.len() != width * height {
            return Err(invalid_parameter(
                "bytes",
                &bytes.len(),
                &format!("expected {} bytes for a {width}x{height} map", width * height),
            ));
        }

        let tiles = bytes
            .iter()
            .map(|&byte| {
                TileType::from_id(byte)
                    .ok_or_else(|| invalid_parameter("bytes", &byte, &"not a tile identifier"))
            })
            .collect::<Result<Vec<_>>>()?;

        let tiles = Array2::from_shape_vec((height, width), tiles)
            .map_err(|e| invalid_parameter("bytes", &bytes.len(), &e))?;

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Tile at a coordinate, `None` outside the map
    pub fn tile(&self, x: usize, y: usize) -> Option<TileType> {
        self.tiles.get([y, x]).copied()
    }

    /// One row of tiles, left to right
    pub fn row(&self, y: usize) -> impl Iterator<Item = TileType> + '_ {
        (0..self.width).filter_map(move |x| self.tile(x, y))
    }

    /// Row-major interchange encoding, one identifier byte per cell
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tiles.iter().map(|tile| tile.id()).collect()
    }

    /// Count of each tile type, indexed by [`TileType::index`]
    pub fn histogram(&self) -> [usize; TileType::COUNT] {
        let mut counts = [0; TileType::COUNT];
        for tile in &self.tiles {
            if let Some(count) = counts.get_mut(tile.index()) {
                *count += 1;
            }
        }
        counts
    }

    /// Neighbouring cell pairs that break the given rules
    ///
    /// Each unordered pair is reported once, from its left or upper cell.
    pub fn violations(&self, rules: &AdjacencyRuleSet) -> Vec<([usize; 2], [usize; 2])> {
        let mut violations = Vec::new();
        for ((y, x), &tile) in self.tiles.indexed_iter() {
            for direction in [Direction::Right, Direction::Down] {
                let Some([nx, ny]) = direction.step([x, y], self.width, self.height) else {
                    continue;
                };
                if let Some(neighbor) = self.tile(nx, ny) {
                    if !rules.compatible(tile, neighbor) {
                        violations.push(([x, y], [nx, ny]));
                    }
                }
            }
        }
        violations
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let line: String = self.row(y).map(TileType::glyph).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
