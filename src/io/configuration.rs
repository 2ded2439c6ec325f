//! Synthesis constants and runtime configuration defaults

// Default values for configurable parameters
/// Default canvas width in pixels
pub const DEFAULT_WIDTH: usize = 512;
/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: usize = 512;
/// Default side length of square candidate tiles
pub const DEFAULT_TILE_SIDE: usize = 48;
/// Default width of the strip a new tile shares with placed content
pub const DEFAULT_OVERLAP: usize = 12;
/// Default stride between extracted candidate tiles
pub const DEFAULT_STEP: usize = 4;
/// Default fractional allowance above the best overlap cost
pub const DEFAULT_TOLERANCE: f64 = 0.1;
/// Default source texture path
pub const DEFAULT_SOURCE: &str = "textures/source.png";
/// Default output raster path
pub const DEFAULT_OUTPUT: &str = "output.png";
/// Fixed seed for reproducible synthesis
pub const DEFAULT_SEED: u64 = 42;

/// Seed argument that requests a time-derived seed
pub const TIME_SEED_SENTINEL: &str = "time";

/// Smallest overlap length the seam search accepts (exclusive)
pub const MIN_OVERLAP_EXCLUSIVE: usize = 2;

// Placements with nothing to compare against all score the same
/// Overlap cost assigned to every candidate when the overlap shape is NONE
pub const NO_OVERLAP_COST: u64 = 1;

// Debug output settings
/// Suffix of the candidate tile mosaic raster
pub const BLOCKS_SUFFIX: &str = "_blocks";
/// Suffix of the per-placement mask overlay raster
pub const MASK_SUFFIX: &str = "_mask";
/// Suffix of the per-placement seam overlay raster
pub const SEAMS_SUFFIX: &str = "_seams";
/// Gap between tiles in the mosaic, in pixels
pub const MOSAIC_GUTTER: usize = 3;

// Progress bar display settings
/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
