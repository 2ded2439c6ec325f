//! Command-line interface for synthesizing a texture from one source image

use crate::algorithm::executor::{QuiltConfig, Quilter};
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_OUTPUT, DEFAULT_OVERLAP, DEFAULT_SEED, DEFAULT_SOURCE, DEFAULT_STEP,
    DEFAULT_TILE_SIDE, DEFAULT_TOLERANCE, DEFAULT_WIDTH, TIME_SEED_SENTINEL,
};
use crate::io::debug::write_debug_rasters;
use crate::io::error::Result;
use crate::io::image::{load_raster, save_raster};
use crate::io::progress::ProgressManager;
use clap::Parser;
use clap::builder::BoolishValueParser;
use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Where the random seed for a run comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedChoice {
    /// A fixed, reproducible seed
    Fixed(u64),
    /// A seed derived from the current time
    Time,
}

impl SeedChoice {
    /// Resolve to a concrete seed
    pub fn resolve(self) -> u64 {
        match self {
            Self::Fixed(seed) => seed,
            // Nanosecond truncation is fine for a seed
            Self::Time => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(DEFAULT_SEED, |elapsed| elapsed.as_nanos() as u64),
        }
    }
}

impl fmt::Display for SeedChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(seed) => write!(f, "{seed}"),
            Self::Time => f.write_str(TIME_SEED_SENTINEL),
        }
    }
}

/// Parse a seed argument: an unsigned integer or the time sentinel
///
/// # Errors
///
/// Returns a message if the argument is neither
pub fn parse_seed(arg: &str) -> std::result::Result<SeedChoice, String> {
    if arg.eq_ignore_ascii_case(TIME_SEED_SENTINEL) {
        return Ok(SeedChoice::Time);
    }
    arg.parse::<u64>().map(SeedChoice::Fixed).map_err(|e| {
        format!("expected an unsigned integer or '{TIME_SEED_SENTINEL}', got '{arg}': {e}")
    })
}

#[derive(Parser, Debug)]
#[command(name = "seamquilt")]
#[command(
    author,
    version,
    about = "Synthesize a texture by quilting blocks of a source image along minimum-error seams"
)]
/// Command-line arguments for the quilting tool
pub struct Cli {
    /// Canvas width in pixels
    #[arg(value_name = "WIDTH", default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Canvas height in pixels
    #[arg(value_name = "HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Overlap length between neighboring tiles
    #[arg(value_name = "OVERLAP", default_value_t = DEFAULT_OVERLAP)]
    pub overlap: usize,

    /// Sampling step between extracted tiles
    #[arg(value_name = "STEP", default_value_t = DEFAULT_STEP)]
    pub step: usize,

    /// Fraction above the best overlap cost still eligible for selection
    #[arg(value_name = "TOLERANCE", default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Source texture
    #[arg(value_name = "SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Random seed, or "time" for a time-derived seed
    #[arg(value_name = "SEED", value_parser = parse_seed, default_value_t = SeedChoice::Fixed(DEFAULT_SEED))]
    pub seed: SeedChoice,

    /// Write debug rasters (on/off)
    #[arg(
        value_name = "DEBUG",
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        default_value = "off"
    )]
    pub debug: bool,

    /// Tile side length in pixels
    #[arg(value_name = "TILE", default_value_t = DEFAULT_TILE_SIDE)]
    pub tile: usize,

    /// Output raster path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Add 90°, 180° and 270° rotations of every tile to the candidates
    #[arg(short, long)]
    pub rotate: bool,

    /// Scoring threads (0 uses one per CPU)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Synthesis parameters described by the arguments
    pub const fn config(&self) -> QuiltConfig {
        QuiltConfig {
            width: self.width,
            height: self.height,
            tile_side: self.tile,
            overlap: self.overlap,
            step: self.step,
            tolerance: self.tolerance,
            include_rotations: self.rotate,
            workers: self.jobs,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one synthesis from parsed arguments to written rasters
pub struct QuiltProcessor {
    cli: Cli,
}

impl QuiltProcessor {
    /// Create a processor for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Validate, synthesize and write the output
    ///
    /// Configuration is checked before the source is read so invalid
    /// parameters never trigger any I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the source cannot be
    /// loaded, synthesis fails, or an output cannot be written
    // Allow print for user feedback on seed and written files
    #[allow(clippy::print_stderr)]
    pub fn process(&self) -> Result<Vec<PathBuf>> {
        let config = self.cli.config();
        config.validate()?;

        let seed = self.cli.seed.resolve();
        if self.cli.should_show_progress() {
            eprintln!("Seed: {seed}");
        }

        let source = load_raster(&self.cli.source)?;
        let mut quilter = Quilter::new(&source.view(), config, seed)?;
        if self.cli.debug {
            quilter.enable_debug();
        }

        let mut progress = if self.cli.should_show_progress() {
            let label = self
                .cli
                .source
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            ProgressManager::new(&label, config.height)
        } else {
            ProgressManager::hidden()
        };

        while quilter.execute_placement()? {
            progress.record_placement(quilter.rows_completed());
        }
        progress.finish();

        let output = quilter.finish();
        save_raster(&output.canvas, &self.cli.output)?;

        let mut written = vec![self.cli.output.clone()];
        if let Some(debug) = &output.debug {
            written.extend(write_debug_rasters(debug, &self.cli.output)?);
        }

        if self.cli.should_show_progress() {
            for path in &written {
                eprintln!("Wrote {}", path.display());
            }
        }

        Ok(written)
    }
}
