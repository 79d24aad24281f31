use crate::spatial::tiles::TileType;
use bitvec::prelude::*;
use std::fmt;

type DomainBits = BitArray<[u8; 1], Lsb0>;

/// Fixed-size bitset of the tile types still possible for one cell
///
/// Bit `i` is set when [`TileType::from_index`]`(i)` remains a candidate.
/// The set is `Copy`, so checkpoints and the grid journal store it by value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Domain {
    bits: DomainBits,
}

impl Domain {
    /// Create a domain with no candidates
    pub fn empty() -> Self {
        Self {
            bits: DomainBits::ZERO,
        }
    }

    /// Create a domain containing every tile type
    pub fn full() -> Self {
        TileType::ALL.into_iter().collect()
    }

    /// Create a collapsed domain holding exactly one tile
    pub fn single(tile: TileType) -> Self {
        let mut domain = Self::empty();
        domain.insert(tile);
        domain
    }

    /// Add a tile to the set
    pub fn insert(&mut self, tile: TileType) {
        self.bits.set(tile.index(), true);
    }

    /// Remove a tile from the set
    pub fn remove(&mut self, tile: TileType) {
        self.bits.set(tile.index(), false);
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileType) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Count the remaining candidates
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test whether no candidate remains
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Test whether exactly one candidate remains
    pub fn is_collapsed(&self) -> bool {
        self.len() == 1
    }

    /// The single remaining tile of a collapsed domain
    pub fn collapsed_tile(&self) -> Option<TileType> {
        if self.is_collapsed() {
            self.iter().next()
        } else {
            None
        }
    }

    /// Iterate the candidates in tile identifier order
    pub fn iter(&self) -> impl Iterator<Item = TileType> + '_ {
        self.bits.iter_ones().filter_map(TileType::from_index)
    }

    /// Intersect this domain with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= other.bits.as_bitslice();
    }

    /// Create a new domain containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = *self;
        result.intersect_with(other);
        result
    }

    /// Add every candidate of another domain to this one
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= other.bits.as_bitslice();
    }

    /// Raw candidate mask, bit `i` for tile index `i`
    pub fn mask(&self) -> u8 {
        self.bits.load::<u8>()
    }
}

impl FromIterator<TileType> for Domain {
    fn from_iter<I: IntoIterator<Item = TileType>>(iter: I) -> Self {
        let mut domain = Self::empty();
        for tile in iter {
            domain.insert(tile);
        }
        domain
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(TileType::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
