use crate::{
    algorithm::{
        bitset::Domain,
        propagation::PropagationQueue,
        selection::{RandomSelector, TileWeights},
    },
    spatial::{Grid, TileType},
};

/// Commits one cell to a single tile
#[derive(Clone, Copy, Debug, Default)]
pub struct Collapser {
    weights: TileWeights,
}

impl Collapser {
    /// Create a collapser drawing tiles with the given weights
    pub const fn new(weights: TileWeights) -> Self {
        Self { weights }
    }

    /// Draw a tile from `candidates` and make it the only one left at `cell`
    ///
    /// The cell is queued so the next propagation pass re-checks its
    /// neighbours. Consistency is not checked here. Returns `None` and leaves
    /// the grid untouched when `candidates` is empty.
    pub fn collapse(
        &self,
        grid: &mut Grid,
        cell: [usize; 2],
        candidates: &Domain,
        random: &mut RandomSelector,
        queue: &mut PropagationQueue,
    ) -> Option<TileType> {
        let tiles: Vec<TileType> = candidates.iter().collect();
        if tiles.is_empty() {
            return None;
        }

        let index = random.weighted_choice(&self.weights.weights_of(candidates));
        let tile = tiles.get(index).copied()?;

        let [x, y] = cell;
        grid.set(x, y, Domain::single(tile));
        queue.push(cell);
        Some(tile)
    }
}
