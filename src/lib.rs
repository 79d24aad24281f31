//! Wave function collapse generator for coastal terrain maps
//!
//! A rectangular grid of cells starts with every tile type possible. The
//! solver repeatedly commits the most constrained cell to a single tile,
//! propagates adjacency constraints to its neighbours and backtracks when a
//! cell runs out of candidates, until every cell holds exactly one of Water,
//! Sand, Grass or Stone.

#![forbid(unsafe_code)]

/// Constraint solver: rules, domains, selection, propagation and backtracking
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Grid storage, tile types and finished maps
pub mod spatial;

pub use algorithm::executor::{GenerationConfig, Solver, generate, generate_with};
pub use algorithm::rules::AdjacencyRuleSet;
pub use io::error::{GenerationError, Result};
pub use spatial::{TileMap, TileType};
