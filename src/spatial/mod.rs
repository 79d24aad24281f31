//! Spatial data structures for map generation
//!
//! This module contains spatial-related functionality including:
//! - Tile types and their identifiers
//! - Per-cell candidate domains with an undo journal
//! - Finished, read-only tile maps

/// Cell domain storage and neighbourhood queries
pub mod grid;
/// Fully collapsed maps exposed to renderers and exporters
pub mod map;
/// Terrain tile types
pub mod tiles;

pub use grid::Grid;
pub use map::TileMap;
pub use tiles::TileType;
