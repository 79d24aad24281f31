//! Command-line interface for generating terrain maps

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::executor::{GenerationConfig, Solver};
use crate::algorithm::rules::AdjacencyRuleSet;
use crate::algorithm::selection::TileWeights;
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_MAP_COUNT, DEFAULT_MAX_RETRIES, DEFAULT_SCALE, DEFAULT_SEED,
    DEFAULT_WIDTH, MAX_SCALE, OUTPUT_SUFFIX, TILE_PALETTE, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{OutputFormat, export_map};
use crate::io::prefill::PrefillData;
use crate::io::progress::ProgressManager;
use crate::spatial::{TileMap, TileType};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Adjacency rule preset selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RulePreset {
    /// Water-Sand, Sand-Grass, Grass-Stone only
    Strict,
    /// Same chain, and every tile may also border itself
    Blended,
}

impl RulePreset {
    /// Rule set for this preset
    pub fn rules(self) -> AdjacencyRuleSet {
        match self {
            Self::Strict => AdjacencyRuleSet::terrain(),
            Self::Blended => AdjacencyRuleSet::blended(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate coastal terrain maps with wave function collapse"
)]
/// Command-line arguments for the map generator
pub struct Cli {
    /// Map width in tiles
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Map height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Backtrack escalations allowed before giving up
    #[arg(short, long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub retries: usize,

    /// Adjacency rule preset [default: strict, or blended with --island]
    #[arg(long, value_enum)]
    pub rules: Option<RulePreset>,

    /// Pin a water border and a stone centre (needs blended rules)
    #[arg(long)]
    pub island: bool,

    /// PNG whose palette-coloured pixels pin tiles
    #[arg(long, value_name = "PNG")]
    pub prefill: Option<PathBuf>,

    /// Tile weights as water,sand,grass,stone
    #[arg(long, value_delimiter = ',')]
    pub weights: Option<Vec<f64>>,

    /// Number of maps to generate, seeded consecutively
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAP_COUNT)]
    pub count: usize,

    /// Output file (.png, .bin or .txt); text goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pixels per tile in PNG and GIF output
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: u32,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Give up on a map after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Rule preset to generate with
    ///
    /// Island maps border Water with Water, so `--island` picks the blended
    /// preset unless `--rules` names one.
    ///
    /// # Errors
    ///
    /// Returns an error if `--island` is combined with `--rules strict`
    pub fn rule_preset(&self) -> Result<RulePreset> {
        match (self.rules, self.island) {
            (Some(RulePreset::Strict), true) => Err(invalid_parameter(
                "island",
                &"strict",
                &"water borders need --rules blended",
            )),
            (Some(preset), _) => Ok(preset),
            (None, true) => Ok(RulePreset::Blended),
            (None, false) => Ok(RulePreset::Strict),
        }
    }

    /// Solver configuration for the first map
    ///
    /// # Errors
    ///
    /// Returns an error if the weights, timeout or scale are invalid
    pub fn generation_config(&self) -> Result<GenerationConfig> {
        if !(1..=MAX_SCALE).contains(&self.scale) {
            return Err(invalid_parameter(
                "scale",
                &self.scale,
                &format!("must be between 1 and {MAX_SCALE}"),
            ));
        }

        let weights = match &self.weights {
            Some(values) => {
                let weights: [f64; TileType::COUNT] =
                    values.as_slice().try_into().map_err(|_| {
                        invalid_parameter(
                            "weights",
                            &values.len(),
                            &"expected water,sand,grass,stone",
                        )
                    })?;
                TileWeights::new(weights)?
            }
            None => TileWeights::uniform(),
        };

        let timeout = self
            .timeout
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .map_err(|e| invalid_parameter("timeout", &secs, &e))
            })
            .transpose()?;

        let config = GenerationConfig::new(self.width, self.height)
            .with_seed(self.seed)
            .with_max_retries(self.retries)
            .with_weights(weights)
            .with_timeout(timeout);
        config.validate()?;
        Ok(config)
    }

    /// Pins requested by `--island` and `--prefill`, merged in that order
    ///
    /// # Errors
    ///
    /// Returns an error if the prefill image cannot be read
    pub fn prefill(&self) -> Result<Option<PrefillData>> {
        let mut prefill = if self.island {
            PrefillData::island(self.width, self.height)
        } else {
            PrefillData::new()
        };

        if let Some(ref path) = self.prefill {
            for placement in PrefillData::from_png(path, &TILE_PALETTE)?.placements() {
                let [x, y] = placement.position;
                prefill.push(x, y, placement.tile);
            }
        }

        Ok((!prefill.is_empty()).then_some(prefill))
    }
}

/// Orchestrates generation of one or more maps with progress tracking
pub struct MapGenerator {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MapGenerator {
    /// Create a new map generator with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate and export every requested map
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, generation or export fails
    pub fn process(&mut self) -> Result<()> {
        if self.cli.count == 0 {
            return Err(invalid_parameter("count", &0, &"must be at least 1"));
        }
        if let Some(ref output) = self.cli.output {
            OutputFormat::from_path(output)?;
        }

        let config = self.cli.generation_config()?;
        let rules = self.cli.rule_preset()?.rules();
        let prefill = self.cli.prefill()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count);
        }

        let mut result = Ok(());
        let mut generated = 0;
        for index in 0..self.cli.count {
            let seed = config.seed.wrapping_add(index as u64);
            match self.process_map(&config.with_seed(seed), &rules, prefill.as_ref(), index) {
                Ok(()) => generated += 1,
                Err(e) if e.is_search_failure() && self.cli.count > 1 => {
                    self.warn(&format!("Skipping seed {seed}: {e}"));
                    result = Err(e);
                }
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        // A batch succeeds when at least one map was written and nothing else broke
        match result {
            Err(e) if generated > 0 && e.is_search_failure() => Ok(()),
            other => other,
        }
    }

    // Allow print for user feedback about skipped maps
    #[allow(clippy::print_stderr)]
    fn warn(&self, message: &str) {
        if !self.cli.quiet {
            eprintln!("{message}");
        }
    }

    fn process_map(
        &mut self,
        config: &GenerationConfig,
        rules: &AdjacencyRuleSet,
        prefill: Option<&PrefillData>,
        index: usize,
    ) -> Result<()> {
        let label = format!("seed {}", config.seed);
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_map(index, &label, config.width * config.height);
        }

        let mut solver = Solver::new(config, rules)?;
        if let Some(prefill) = prefill {
            solver.apply_prefill(prefill)?;
        }
        if self.cli.visualize {
            solver.enable_visualization();
        }

        let outcome = {
            let progress = &mut self.progress_manager;
            solver.run_observed(&CancellationToken::new(), |solver| {
                if let Some(pm) = progress.as_mut() {
                    pm.update_map(index, solver.grid().collapsed_count());
                }
            })
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_map(index, outcome.is_ok());
        }
        outcome?;

        let map = solver.tile_map()?;
        self.write_map(&map, index)?;

        if self.cli.visualize {
            let viz_path = self.visualization_path(index);
            solver.export_visualization(&viz_path, self.cli.scale)?;
        }

        Ok(())
    }

    // Allow print for maps written to stdout when no output file is given
    #[allow(clippy::print_stdout)]
    fn write_map(&self, map: &TileMap, index: usize) -> Result<()> {
        match self.output_path(index) {
            Some(path) => export_map(map, &TILE_PALETTE, &path, self.cli.scale),
            None => {
                if index > 0 {
                    println!();
                }
                print!("{map}");
                Ok(())
            }
        }
    }

    fn output_path(&self, index: usize) -> Option<PathBuf> {
        let output = self.cli.output.as_ref()?;
        if self.cli.count <= 1 {
            return Some(output.clone());
        }
        Some(numbered_path(output, index))
    }

    fn visualization_path(&self, index: usize) -> PathBuf {
        let base = self
            .output_path(index)
            .unwrap_or_else(|| numbered_path(Path::new("tilecollapse.png"), index));
        let stem = base.file_stem().unwrap_or_default();
        let viz_name = format!("{}{VISUALIZATION_SUFFIX}", stem.to_string_lossy());

        if let Some(parent) = base.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}

/// `out.png` becomes `out_map3.png` for map index 3
pub fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let extension = path.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        index,
        extension.to_string_lossy()
    );

    if let Some(parent) = path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
