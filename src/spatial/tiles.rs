//! Terrain tile types and their stable identifiers

use std::fmt;
use std::str::FromStr;

/// One terrain tile a map cell can hold
///
/// The discriminant doubles as the one-byte interchange identifier and as the
/// bit position inside a [`Domain`](crate::algorithm::bitset::Domain).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileType {
    /// Open water
    Water = 0,
    /// Beach sand
    Sand = 1,
    /// Grassland
    Grass = 2,
    /// Rock and mountain
    Stone = 3,
}

impl TileType {
    /// Number of tile types
    pub const COUNT: usize = 4;

    /// Every tile type in identifier order
    pub const ALL: [Self; Self::COUNT] = [Self::Water, Self::Sand, Self::Grass, Self::Stone];

    /// Zero-based position of this tile in [`TileType::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tile for a zero-based index, if one exists
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Water),
            1 => Some(Self::Sand),
            2 => Some(Self::Grass),
            3 => Some(Self::Stone),
            _ => None,
        }
    }

    /// Interchange byte for this tile
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Tile for an interchange byte, if one exists
    pub const fn from_id(id: u8) -> Option<Self> {
        Self::from_index(id as usize)
    }

    /// Lowercase name used on the command line and in messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Sand => "sand",
            Self::Grass => "grass",
            Self::Stone => "stone",
        }
    }

    /// Single character used by the text renderer
    pub const fn glyph(self) -> char {
        match self {
            Self::Water => '~',
            Self::Sand => '.',
            Self::Grass => '"',
            Self::Stone => '^',
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|tile| tile.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown tile '{trimmed}' (expected water, sand, grass or stone)"))
    }
}
