//! Checkpoint and rollback for contradiction recovery
//!
//! Each collapse pushes a frame holding a grid journal mark and the tiles not
//! yet tried at that cell. A contradiction rewinds to the newest mark and
//! retries the same cell without the failed tile. When a cell has no tiles
//! left, the frame is dropped and the previous decision is revisited instead.
//! That escalation is what the retry budget counts.

use crate::{
    algorithm::{bitset::Domain, propagation::PropagationQueue},
    spatial::{Grid, TileType},
};

/// Restorable grid state taken just before a collapse
///
/// The propagation queue is always empty when a checkpoint is taken, so the
/// journal mark alone restores every domain and the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    journal_mark: usize,
}

impl Checkpoint {
    /// Record the current grid state
    pub fn capture(grid: &Grid) -> Self {
        Self {
            journal_mark: grid.journal_len(),
        }
    }

    /// Bring the grid and queue back to the recorded state
    ///
    /// Returns the cells whose domains were rewritten.
    pub fn restore(&self, grid: &mut Grid, queue: &mut PropagationQueue) -> Vec<[usize; 2]> {
        queue.clear();
        grid.rewind(self.journal_mark)
    }
}

#[derive(Clone, Debug)]
struct Frame {
    checkpoint: Checkpoint,
    cell: [usize; 2],
    remaining: Domain,
}

/// Next move after a contradiction has been rolled back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Collapse `cell` again, choosing from `candidates`
    Retry {
        /// Cell to collapse
        cell: [usize; 2],
        /// Tiles not yet tried there
        candidates: Domain,
        /// Whether earlier decisions had to be undone to get here
        escalated: bool,
    },
    /// The escalation budget is spent
    BudgetExhausted,
    /// Every alternative of every decision has failed
    SearchExhausted,
}

/// Stack of collapse decisions with an escalation budget
#[derive(Clone, Debug)]
pub struct BacktrackController {
    frames: Vec<Frame>,
    escalations: usize,
    local_retries: usize,
    max_retries: usize,
}

impl BacktrackController {
    /// Create a controller allowing `max_retries` escalations
    pub const fn new(max_retries: usize) -> Self {
        Self {
            frames: Vec::new(),
            escalations: 0,
            local_retries: 0,
            max_retries,
        }
    }

    /// Record a checkpoint before collapsing `cell`
    pub fn begin(&mut self, grid: &Grid, cell: [usize; 2]) {
        let [x, y] = cell;
        let remaining = grid.get(x, y).unwrap_or_default();
        self.frames.push(Frame {
            checkpoint: Checkpoint::capture(grid),
            cell,
            remaining,
        });
    }

    /// Cell and untried tiles of the newest decision
    pub fn current(&self) -> Option<([usize; 2], Domain)> {
        self.frames.last().map(|frame| (frame.cell, frame.remaining))
    }

    /// Mark `tile` as tried for the newest decision
    pub fn record_attempt(&mut self, tile: TileType) {
        if let Some(frame) = self.frames.last_mut() {
            frame.remaining.remove(tile);
        }
    }

    /// Roll back after a contradiction and decide what to try next
    pub fn recover(&mut self, grid: &mut Grid, queue: &mut PropagationQueue) -> Recovery {
        let mut escalated = false;

        loop {
            let Some(frame) = self.frames.last() else {
                return Recovery::SearchExhausted;
            };
            frame.checkpoint.restore(grid, queue);

            if !frame.remaining.is_empty() {
                if !escalated {
                    self.local_retries += 1;
                }
                return Recovery::Retry {
                    cell: frame.cell,
                    candidates: frame.remaining,
                    escalated,
                };
            }

            self.frames.pop();
            if self.frames.is_empty() {
                return Recovery::SearchExhausted;
            }
            if self.escalations >= self.max_retries {
                return Recovery::BudgetExhausted;
            }
            self.escalations += 1;
            escalated = true;
        }
    }

    /// Escalations performed so far
    pub const fn escalations(&self) -> usize {
        self.escalations
    }

    /// Same-cell retries performed so far
    pub const fn local_retries(&self) -> usize {
        self.local_retries
    }

    /// Configured escalation budget
    pub const fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Number of decisions currently on the stack
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
