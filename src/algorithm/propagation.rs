use crate::{algorithm::rules::AdjacencyRuleSet, spatial::Grid};
use ndarray::Array2;
use std::collections::VecDeque;

/// Cells whose domain changed and whose neighbours still need re-checking
///
/// A cell is held at most once; pushing a queued cell is a no-op.
#[derive(Clone, Debug)]
pub struct PropagationQueue {
    pending: VecDeque<[usize; 2]>,
    /// Membership flags indexed by `[row, col]`
    queued: Array2<bool>,
}

impl PropagationQueue {
    /// Create an empty queue for a grid of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            queued: Array2::from_elem((height, width), false),
        }
    }

    /// Queue a cell, returning whether it was newly added
    pub fn push(&mut self, cell: [usize; 2]) -> bool {
        let [x, y] = cell;
        match self.queued.get_mut([y, x]) {
            Some(flag) if !*flag => {
                *flag = true;
                self.pending.push_back(cell);
                true
            }
            _ => false,
        }
    }

    /// Take the oldest queued cell
    pub fn pop(&mut self) -> Option<[usize; 2]> {
        let cell = self.pending.pop_front()?;
        if let Some(flag) = self.queued.get_mut([cell[1], cell[0]]) {
            *flag = false;
        }
        Some(cell)
    }

    /// Number of queued cells
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Test whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every queued cell
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}

/// A cell ran out of candidates during propagation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    /// Cell whose domain became empty
    pub cell: [usize; 2],
    /// Revision steps performed before the contradiction was found
    pub steps: usize,
}

/// Work done by one successful propagation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Neighbour revisions performed
    pub steps: usize,
    /// Domains that were narrowed
    pub narrowed: usize,
}

/// Upper bound on revision steps for one pass over `cell_count` cells
///
/// Every cell enters the queue once initially and again only after losing a
/// candidate, and each dequeue revises at most four neighbours.
pub const fn propagation_step_bound(cell_count: usize, tile_count: usize) -> usize {
    4 * cell_count * (tile_count + 1)
}

/// Run arc-consistency from the queued cells until nothing changes
///
/// For each dequeued cell, every neighbour's domain is intersected with the
/// tiles allowed next to the cell. Narrowed neighbours are queued in turn.
///
/// # Errors
///
/// Returns the first cell whose domain became empty. The queue is cleared and
/// the grid is left mid-pass, to be restored by the caller.
pub fn propagate(
    grid: &mut Grid,
    rules: &AdjacencyRuleSet,
    queue: &mut PropagationQueue,
) -> Result<PropagationReport, Contradiction> {
    let mut report = PropagationReport::default();

    while let Some([x, y]) = queue.pop() {
        let Some(domain) = grid.get(x, y) else {
            continue;
        };
        let allowed = rules.allowed_neighbors_of(&domain);

        for [nx, ny] in grid.neighbors_of(x, y) {
            report.steps += 1;

            let Some(current) = grid.get(nx, ny) else {
                continue;
            };
            let narrowed = current.intersection(&allowed);
            if narrowed == current {
                continue;
            }

            grid.set(nx, ny, narrowed);
            if narrowed.is_empty() {
                queue.clear();
                return Err(Contradiction {
                    cell: [nx, ny],
                    steps: report.steps,
                });
            }

            report.narrowed += 1;
            queue.push([nx, ny]);
        }
    }

    Ok(report)
}
