use crate::{
    algorithm::{
        backtrack::{BacktrackController, Recovery},
        bitset::Domain,
        cancellation::CancellationToken,
        collapse::Collapser,
        propagation::{PropagationQueue, propagate},
        rules::AdjacencyRuleSet,
        selection::{EntropySelector, RandomSelector, Selection, TileWeights},
    },
    io::{
        configuration::{
            DEFAULT_HEIGHT, DEFAULT_MAX_RETRIES, DEFAULT_SEED, DEFAULT_WIDTH, GIF_FRAME_DELAY_MS,
            MAX_GRID_DIMENSION,
        },
        error::{GenerationError, Result, invalid_parameter},
        prefill::PrefillData,
        visualization::VisualizationCapture,
    },
    spatial::{Grid, TileMap},
};
use std::path::Path;
use std::time::{Duration, Instant};

/// Parameters of a single generation attempt
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Map width in tiles
    pub width: usize,
    /// Map height in tiles
    pub height: usize,
    /// Seed for every random choice of the attempt
    pub seed: u64,
    /// Escalations allowed before giving up
    pub max_retries: usize,
    /// Tile likelihoods used for collapse and entropy
    pub weights: TileWeights,
    /// Wall-clock limit for the whole attempt
    pub timeout: Option<Duration>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl GenerationConfig {
    /// Configuration for a map of the given size with default settings
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: DEFAULT_SEED,
            max_retries: DEFAULT_MAX_RETRIES,
            weights: TileWeights::uniform(),
            timeout: None,
        }
    }

    /// Replace the seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the escalation budget
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Replace the tile weights
    #[must_use]
    pub const fn with_weights(mut self, weights: TileWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set or clear the wall-clock limit
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the map dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - Either dimension exceeds `MAX_GRID_DIMENSION`
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerationError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

/// Lifecycle of a solver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    /// Cells remain undetermined
    Running,
    /// Every cell holds exactly one tile
    Solved,
    /// The search gave up
    Failed,
}

/// Counters describing the work a solver has done
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Completed driving-loop cycles
    pub cycles: usize,
    /// Collapse attempts, retries included
    pub collapses: usize,
    /// Neighbour revisions across all propagation passes
    pub propagation_steps: usize,
    /// Propagation passes that ended in a contradiction
    pub contradictions: usize,
    /// Retries of the same cell with the failed tile removed
    pub local_retries: usize,
    /// Retries that had to undo earlier decisions
    pub escalations: usize,
}

/// Wave function collapse solver over one grid
///
/// Each cycle picks the lowest-entropy cell, collapses it and propagates the
/// consequences. Contradictions are rolled back through the backtrack
/// controller, so a grid observed between cycles never holds an empty domain.
pub struct Solver<'a> {
    rules: &'a AdjacencyRuleSet,
    grid: Grid,
    queue: PropagationQueue,
    selector: EntropySelector,
    collapser: Collapser,
    random: RandomSelector,
    backtrack: BacktrackController,
    state: SolverState,
    stats: SolverStats,
    timeout: Option<Duration>,
    initialized: bool,
    /// Optional animation capture
    visualization: Option<VisualizationCapture>,
}

impl<'a> Solver<'a> {
    /// Create a solver with every cell allowing every tile
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`GenerationConfig::validate`]
    pub fn new(config: &GenerationConfig, rules: &'a AdjacencyRuleSet) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;

        Ok(Self {
            rules,
            queue: PropagationQueue::new(grid.width(), grid.height()),
            grid,
            selector: EntropySelector::new(config.weights),
            collapser: Collapser::new(config.weights),
            random: RandomSelector::new(config.seed),
            backtrack: BacktrackController::new(config.max_retries),
            state: SolverState::Running,
            stats: SolverStats::default(),
            timeout: config.timeout,
            initialized: false,
            visualization: None,
        })
    }

    /// Replace the random source
    #[must_use]
    pub fn with_random(mut self, random: RandomSelector) -> Self {
        self.random = random;
        self
    }

    /// Pin tiles before the first cycle
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The solver has already started
    /// - A pin lies outside the grid
    /// - Two pins disagree about the same cell
    pub fn apply_prefill(&mut self, prefill: &PrefillData) -> Result<()> {
        if self.initialized {
            return Err(invalid_parameter(
                "prefill",
                &prefill.len(),
                &"pins must be applied before the first cycle",
            ));
        }

        for placement in prefill.placements() {
            let [x, y] = placement.position;
            let Some(domain) = self.grid.get(x, y) else {
                return Err(invalid_parameter(
                    "prefill",
                    &format!("({x}, {y})"),
                    &format!(
                        "outside the {}x{} grid",
                        self.grid.width(),
                        self.grid.height()
                    ),
                ));
            };

            if !domain.contains(placement.tile) {
                self.state = SolverState::Failed;
                return Err(self.unsatisfiable());
            }
            self.grid.set(x, y, Domain::single(placement.tile));
            self.queue.push(placement.position);
        }
        Ok(())
    }

    /// Run the initial propagation pass over the whole grid
    ///
    /// Called automatically by the first cycle. Everything done up to here is
    /// permanent and never undone by backtracking.
    ///
    /// # Errors
    ///
    /// Returns `Unsatisfiable` if the pins contradict the rules
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;

        let cells: Vec<[usize; 2]> = self.grid.cells().map(|(cell, _)| cell).collect();
        for cell in cells {
            self.queue.push(cell);
        }

        match propagate(&mut self.grid, self.rules, &mut self.queue) {
            Ok(report) => self.stats.propagation_steps += report.steps,
            Err(contradiction) => {
                self.stats.propagation_steps += contradiction.steps;
                self.stats.contradictions += 1;
                self.state = SolverState::Failed;
                return Err(self.unsatisfiable());
            }
        }
        self.grid.seal_journal();

        if let Some(ref mut viz) = self.visualization {
            viz.record_cycle(0, &self.grid);
        }
        Ok(())
    }

    /// Run one cycle: select, collapse, propagate and recover if needed
    ///
    /// Returns `false` once nothing is left to do.
    ///
    /// # Errors
    ///
    /// Returns `Unsatisfiable` once the search gives up
    pub fn run_iteration(&mut self) -> Result<bool> {
        if self.state != SolverState::Running {
            return Ok(false);
        }
        self.initialize()?;

        let mut cell = match self.selector.select(&self.grid, &mut self.random) {
            Selection::Cell(cell) => cell,
            Selection::NothingToCollapse => {
                self.state = SolverState::Solved;
                if let Some(ref mut viz) = self.visualization {
                    viz.record_final(&self.grid);
                }
                return Ok(false);
            }
        };

        self.stats.cycles += 1;
        self.backtrack.begin(&self.grid, cell);
        let mut candidates = self.grid.get(cell[0], cell[1]).unwrap_or_default();

        loop {
            let Some(tile) = self.collapser.collapse(
                &mut self.grid,
                cell,
                &candidates,
                &mut self.random,
                &mut self.queue,
            ) else {
                self.state = SolverState::Failed;
                return Err(self.unsatisfiable());
            };
            self.backtrack.record_attempt(tile);
            self.stats.collapses += 1;

            match propagate(&mut self.grid, self.rules, &mut self.queue) {
                Ok(report) => {
                    self.stats.propagation_steps += report.steps;
                    break;
                }
                Err(contradiction) => {
                    self.stats.propagation_steps += contradiction.steps;
                    self.stats.contradictions += 1;
                }
            }

            match self.backtrack.recover(&mut self.grid, &mut self.queue) {
                Recovery::Retry {
                    cell: retry_cell,
                    candidates: remaining,
                    ..
                } => {
                    cell = retry_cell;
                    candidates = remaining;
                    self.sync_backtrack_stats();
                }
                Recovery::BudgetExhausted | Recovery::SearchExhausted => {
                    self.sync_backtrack_stats();
                    self.state = SolverState::Failed;
                    return Err(self.unsatisfiable());
                }
            }
        }

        if let Some(ref mut viz) = self.visualization {
            viz.record_cycle(self.stats.cycles, &self.grid);
        }
        Ok(true)
    }

    /// Run cycles until solved, failed or cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The search gives up (`Unsatisfiable`)
    /// - The token is cancelled or the configured timeout passes (`Cancelled`)
    pub fn run(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.run_observed(cancel, |_| {})
    }

    /// Like [`Solver::run`], calling `observe` after every cycle
    ///
    /// # Errors
    ///
    /// Same as [`Solver::run`]
    pub fn run_observed<F>(&mut self, cancel: &CancellationToken, mut observe: F) -> Result<()>
    where
        F: FnMut(&Self),
    {
        let deadline = self
            .timeout
            .and_then(|timeout| Instant::now().checked_add(timeout));

        loop {
            if cancel.is_cancelled() || deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(GenerationError::Cancelled {
                    cycles: self.stats.cycles,
                });
            }
            if !self.run_iteration()? {
                return Ok(());
            }
            observe(self);
        }
    }

    /// The solved map
    ///
    /// # Errors
    ///
    /// Returns an error if some cell is still undetermined
    pub fn tile_map(&self) -> Result<TileMap> {
        TileMap::from_grid(&self.grid)
    }

    /// Current grid of domains
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Work counters so far
    pub const fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Enable GIF recording of solver progress
    pub fn enable_visualization(&mut self) {
        self.visualization = Some(VisualizationCapture::new(
            self.grid.width(),
            self.grid.height(),
        ));
    }

    /// Export visualization as GIF if enabled
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Visualization was not enabled
    /// - GIF export fails
    pub fn export_visualization(&self, output_path: &Path, scale: u32) -> Result<()> {
        self.visualization.as_ref().map_or_else(
            || {
                Err(invalid_parameter(
                    "visualization",
                    &"disabled",
                    &"visualization was not enabled for this run",
                ))
            },
            |viz| viz.export_gif(output_path, GIF_FRAME_DELAY_MS, scale),
        )
    }

    fn sync_backtrack_stats(&mut self) {
        self.stats.local_retries = self.backtrack.local_retries();
        self.stats.escalations = self.backtrack.escalations();
    }

    fn unsatisfiable(&self) -> GenerationError {
        GenerationError::Unsatisfiable {
            escalations: self.backtrack.escalations(),
            max_retries: self.backtrack.max_retries(),
        }
    }
}

/// Generate a fully collapsed map
///
/// Identical arguments always give the identical map.
///
/// # Errors
///
/// Returns an error if:
/// - Either dimension is zero (`ZeroDimension`)
/// - The search gives up within `max_retries` escalations (`Unsatisfiable`)
pub fn generate(
    width: usize,
    height: usize,
    rules: &AdjacencyRuleSet,
    seed: u64,
    max_retries: usize,
) -> Result<TileMap> {
    let config = GenerationConfig::new(width, height)
        .with_seed(seed)
        .with_max_retries(max_retries);
    generate_with(&config, rules, None, &CancellationToken::new())
}

/// Generate a map with full control over configuration, pins and cancellation
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - A pin is out of bounds or contradicts the rules
/// - The search gives up (`Unsatisfiable`)
/// - The token is cancelled or the timeout passes (`Cancelled`)
pub fn generate_with(
    config: &GenerationConfig,
    rules: &AdjacencyRuleSet,
    prefill: Option<&PrefillData>,
    cancel: &CancellationToken,
) -> Result<TileMap> {
    let mut solver = Solver::new(config, rules)?;
    if let Some(prefill) = prefill {
        solver.apply_prefill(prefill)?;
    }
    solver.run(cancel)?;
    solver.tile_map()
}
