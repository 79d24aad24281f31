//! Tile compatibility table shared by every solver component

use crate::algorithm::bitset::Domain;
use crate::io::error::{GenerationError, Result};
use crate::spatial::tiles::TileType;
use ndarray::Array2;

/// Symmetric compatibility relation over tile pairs
///
/// Stored as a boolean matrix indexed by tile identifiers, plus a precomputed
/// neighbour mask per tile so [`AdjacencyRuleSet::allowed_neighbors_of`] is a
/// union of at most [`TileType::COUNT`] masks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyRuleSet {
    compatibility: Array2<bool>,
    neighbor_masks: [Domain; TileType::COUNT],
}

impl AdjacencyRuleSet {
    /// Build a rule set from directed pairs
    ///
    /// Every pair `(a, b)` must be accompanied by `(b, a)`; a missing mirror is
    /// reported rather than added.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRules` if the list is empty or not symmetric
    pub fn from_pairs(pairs: &[(TileType, TileType)]) -> Result<Self> {
        if pairs.is_empty() {
            return Err(GenerationError::InvalidRules {
                reason: "rule list is empty".to_string(),
            });
        }

        let rules = Self::from_matrix(matrix_from_pairs(pairs));

        for &(a, b) in pairs {
            if !rules.compatible(b, a) {
                return Err(GenerationError::InvalidRules {
                    reason: format!("{a}->{b} is listed but {b}->{a} is not"),
                });
            }
        }

        Ok(rules)
    }

    /// Build a rule set from undirected edges, listing both directions of each
    ///
    /// # Errors
    ///
    /// Returns `InvalidRules` if the edge list is empty
    pub fn from_edges(edges: &[(TileType, TileType)]) -> Result<Self> {
        let pairs: Vec<(TileType, TileType)> = edges
            .iter()
            .flat_map(|&(a, b)| [(a, b), (b, a)])
            .collect();
        Self::from_pairs(&pairs)
    }

    /// Coastal terrain rules: Water-Sand, Sand-Grass, Grass-Stone, nothing else
    pub fn terrain() -> Self {
        Self::from_matrix(matrix_from_pairs(&mirrored(&TERRAIN_EDGES)))
    }

    /// Terrain rules where every tile may also border itself
    ///
    /// Smooth regions of one tile are allowed, which gives contiguous lakes,
    /// beaches and mountains instead of alternating stripes.
    pub fn blended() -> Self {
        let mut pairs = mirrored(&TERRAIN_EDGES);
        pairs.extend(TileType::ALL.into_iter().map(|tile| (tile, tile)));
        Self::from_matrix(matrix_from_pairs(&pairs))
    }

    /// Test whether `a` may sit next to `b`
    pub fn compatible(&self, a: TileType, b: TileType) -> bool {
        self.compatibility
            .get([a.index(), b.index()])
            .copied()
            .unwrap_or(false)
    }

    /// Tiles compatible with at least one tile of `domain`
    pub fn allowed_neighbors_of(&self, domain: &Domain) -> Domain {
        let mut allowed = Domain::empty();
        for tile in domain.iter() {
            if let Some(mask) = self.neighbor_masks.get(tile.index()) {
                allowed.union_with(mask);
            }
        }
        allowed
    }

    /// Tiles compatible with `tile`
    pub fn neighbors_of_tile(&self, tile: TileType) -> Domain {
        self.neighbor_masks
            .get(tile.index())
            .copied()
            .unwrap_or_default()
    }

    /// All compatible directed pairs in identifier order
    pub fn pairs(&self) -> Vec<(TileType, TileType)> {
        TileType::ALL
            .into_iter()
            .flat_map(|a| TileType::ALL.into_iter().map(move |b| (a, b)))
            .filter(|&(a, b)| self.compatible(a, b))
            .collect()
    }

    /// Check the relation is symmetric
    pub fn is_symmetric(&self) -> bool {
        self.compatibility == self.compatibility.t()
    }

    fn from_matrix(compatibility: Array2<bool>) -> Self {
        let mut neighbor_masks = [Domain::empty(); TileType::COUNT];
        for ((a, b), &allowed) in compatibility.indexed_iter() {
            if let (true, Some(mask), Some(tile)) =
                (allowed, neighbor_masks.get_mut(a), TileType::from_index(b))
            {
                mask.insert(tile);
            }
        }

        Self {
            compatibility,
            neighbor_masks,
        }
    }
}

impl Default for AdjacencyRuleSet {
    fn default() -> Self {
        Self::terrain()
    }
}

const TERRAIN_EDGES: [(TileType, TileType); 3] = [
    (TileType::Water, TileType::Sand),
    (TileType::Sand, TileType::Grass),
    (TileType::Grass, TileType::Stone),
];

fn mirrored(edges: &[(TileType, TileType)]) -> Vec<(TileType, TileType)> {
    edges.iter().flat_map(|&(a, b)| [(a, b), (b, a)]).collect()
}

fn matrix_from_pairs(pairs: &[(TileType, TileType)]) -> Array2<bool> {
    let mut compatibility = Array2::from_elem((TileType::COUNT, TileType::COUNT), false);
    for &(a, b) in pairs {
        if let Some(entry) = compatibility.get_mut([a.index(), b.index()]) {
            *entry = true;
        }
    }
    compatibility
}
