//! Cell domain storage with an undo journal
//!
//! Holds the candidate domain of every cell in a width x height rectangle.
//! Every write that changes a domain is journaled so the backtracking layer
//! can restore an earlier state by rewinding to a recorded journal length.
//! Coordinates are `[x, y]` with `x` the column and `y` the row.

use ndarray::Array2;

use crate::algorithm::bitset::Domain;
use crate::io::error::{GenerationError, Result};

/// One of the four axis-aligned neighbour directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
    /// Towards the last column
    Right,
}

impl Direction {
    /// Every direction, in the order neighbours are visited
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Move one step from `cell`, or `None` when that leaves the rectangle
    pub const fn step(self, cell: [usize; 2], width: usize, height: usize) -> Option<[usize; 2]> {
        let [x, y] = cell;
        match self {
            Self::Up if y > 0 => Some([x, y - 1]),
            Self::Down if y + 1 < height => Some([x, y + 1]),
            Self::Left if x > 0 => Some([x - 1, y]),
            Self::Right if x + 1 < width => Some([x + 1, y]),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct JournalEntry {
    cell: [usize; 2],
    previous: Domain,
}

/// Candidate domains for every cell of the map
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Domains indexed by `[row, col]`
    cells: Array2<Domain>,
    journal: Vec<JournalEntry>,
}

impl Grid {
    /// Create a grid with every cell holding every tile type
    ///
    /// # Errors
    ///
    /// Returns `ZeroDimension` if either dimension is zero
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GenerationError::ZeroDimension { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: Array2::from_elem((height, width), Domain::full()),
            journal: Vec::new(),
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

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Test whether a coordinate lies inside the grid
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// In-bounds orthogonal neighbours of a cell
    ///
    /// Edge and corner cells have fewer than four; nothing outside the grid
    /// constrains them.
    pub fn neighbors_of(&self, x: usize, y: usize) -> impl Iterator<Item = [usize; 2]> + use<> {
        let (width, height) = (self.width, self.height);
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| direction.step([x, y], width, height))
    }

    /// Domain of a cell
    pub fn get(&self, x: usize, y: usize) -> Option<Domain> {
        self.cells.get([y, x]).copied()
    }

    /// Replace the domain of a cell, journaling the previous value
    ///
    /// Returns `false` when the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, domain: Domain) -> bool {
        let Some(cell) = self.cells.get_mut([y, x]) else {
            return false;
        };

        if *cell != domain {
            self.journal.push(JournalEntry {
                cell: [x, y],
                previous: *cell,
            });
            *cell = domain;
        }
        true
    }

    /// Test whether every cell holds exactly one tile
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Domain::is_collapsed)
    }

    /// Number of cells holding exactly one tile
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|domain| domain.is_collapsed()).count()
    }

    /// Test whether any cell has run out of candidates
    pub fn has_contradiction(&self) -> bool {
        self.cells.iter().any(Domain::is_empty)
    }

    /// Every cell with its domain, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ([usize; 2], Domain)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), domain)| ([col, row], *domain))
    }

    /// Number of journaled writes, usable as a rewind mark
    pub fn journal_len(&self) -> usize {
        self.journal.len()
    }

    /// Undo every write made after `mark`, newest first
    ///
    /// Returns the cells that were touched, which may repeat.
    pub fn rewind(&mut self, mark: usize) -> Vec<[usize; 2]> {
        let mut touched = Vec::new();
        while self.journal.len() > mark {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            if let Some(cell) = self.cells.get_mut([entry.cell[1], entry.cell[0]]) {
                *cell = entry.previous;
            }
            touched.push(entry.cell);
        }
        touched
    }

    /// Forget the journal so the current state can no longer be rewound past
    pub fn seal_journal(&mut self) {
        self.journal.clear();
    }

    /// Copy of every domain indexed by `[row, col]`
    pub fn snapshot(&self) -> Array2<Domain> {
        self.cells.clone()
    }
}
