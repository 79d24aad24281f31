//! Generation constants and runtime configuration defaults

use crate::spatial::TileType;

// Map size used when the command line does not give one
/// Default map width in tiles
pub const DEFAULT_WIDTH: usize = 32;
/// Default map height in tiles
pub const DEFAULT_HEIGHT: usize = 32;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed map dimension
pub const MAX_GRID_DIMENSION: usize = 4_096;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of backtrack escalations before giving up
pub const DEFAULT_MAX_RETRIES: usize = 1_000;

/// Default number of maps generated per invocation
pub const DEFAULT_MAP_COUNT: usize = 1;

/// Default pixels per tile in exported images
pub const DEFAULT_SCALE: u32 = 8;
/// Largest accepted pixels per tile
pub const MAX_SCALE: u32 = 64;

/// RGBA colour of each tile type, indexed by [`TileType::index`]
pub const TILE_PALETTE: [[u8; 4]; TileType::COUNT] = [
    [64, 164, 223, 255],
    [237, 201, 130, 255],
    [96, 168, 72, 255],
    [120, 120, 128, 255],
];

/// Colour of cells that are still undetermined in animation frames
pub const UNDETERMINED_COLOR: [u8; 4] = [24, 24, 32, 255];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Output settings
/// Suffix added to numbered output filenames when several maps are generated
pub const OUTPUT_SUFFIX: &str = "_map";
/// Suffix added to the animation written next to an output file
pub const VISUALIZATION_SUFFIX: &str = "_visualization.gif";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Upper bound on captured animation frames per map
pub const MAX_CAPTURED_FRAMES: usize = 600;
