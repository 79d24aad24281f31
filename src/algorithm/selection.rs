use crate::{
    algorithm::bitset::Domain,
    io::error::{Result, invalid_parameter},
    spatial::{Grid, TileType},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Entropies closer than this are treated as tied
pub const ENTROPY_TIE_EPSILON: f64 = 1e-9;

/// Relative likelihood of each tile being drawn during collapse
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileWeights {
    weights: [f64; TileType::COUNT],
}

impl Default for TileWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

impl TileWeights {
    /// Every tile equally likely
    pub const fn uniform() -> Self {
        Self {
            weights: [1.0; TileType::COUNT],
        }
    }

    /// Weights in [`TileType::ALL`] order
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any weight is not finite and positive
    pub fn new(weights: [f64; TileType::COUNT]) -> Result<Self> {
        for (tile, weight) in TileType::ALL.into_iter().zip(weights) {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(invalid_parameter(
                    "weights",
                    &format!("{tile}={weight}"),
                    &"weights must be finite and positive",
                ));
            }
        }
        Ok(Self { weights })
    }

    /// Weight of one tile
    pub fn weight(&self, tile: TileType) -> f64 {
        self.weights.get(tile.index()).copied().unwrap_or(0.0)
    }

    /// Weights of the candidates of `domain`, in domain order
    pub fn weights_of(&self, domain: &Domain) -> Vec<f64> {
        domain.iter().map(|tile| self.weight(tile)).collect()
    }

    /// Shannon entropy of a domain under these weights
    ///
    /// For uniform weights this is `ln(|domain|)`, so ordering cells by it is
    /// the same as ordering by candidate count.
    pub fn entropy(&self, domain: &Domain) -> f64 {
        let (total, weighted_log_sum) = domain
            .iter()
            .map(|tile| self.weight(tile))
            .fold((0.0_f64, 0.0_f64), |(total, sum), weight| {
                (total + weight, weight.mul_add(weight.ln(), sum))
            });

        if total <= 0.0 {
            return 0.0;
        }
        total.ln() - weighted_log_sum / total
    }
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Wrap an already seeded generator
    pub const fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Generic weighted random selection
    ///
    /// Returns index into weights array using cumulative distribution
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        weights.len().saturating_sub(1)
    }

    /// Uniform index below `len`, `None` for an empty range
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }
}

/// Outcome of looking for the next cell to collapse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Collapse this cell next
    Cell([usize; 2]),
    /// Every cell already holds a single tile
    NothingToCollapse,
}

/// Picks the undetermined cell with the lowest entropy
#[derive(Clone, Copy, Debug, Default)]
pub struct EntropySelector {
    weights: TileWeights,
}

impl EntropySelector {
    /// Create a selector using the given tile weights for entropy
    pub const fn new(weights: TileWeights) -> Self {
        Self { weights }
    }

    /// All undetermined cells sharing the minimum entropy, in row-major order
    pub fn candidates(&self, grid: &Grid) -> Vec<[usize; 2]> {
        let mut best = f64::INFINITY;
        let mut candidates = Vec::new();

        for (cell, domain) in grid.cells() {
            if domain.len() <= 1 {
                continue;
            }

            let entropy = self.weights.entropy(&domain);
            if entropy < best - ENTROPY_TIE_EPSILON {
                best = entropy;
                candidates.clear();
                candidates.push(cell);
            } else if (entropy - best).abs() <= ENTROPY_TIE_EPSILON {
                candidates.push(cell);
            }
        }

        candidates
    }

    /// Choose the next cell, breaking ties with the random source
    pub fn select(&self, grid: &Grid, random: &mut RandomSelector) -> Selection {
        let candidates = self.candidates(grid);
        random
            .choose_index(candidates.len())
            .and_then(|index| candidates.get(index).copied())
            .map_or(Selection::NothingToCollapse, Selection::Cell)
    }
}
