use crate::{
    algorithm::compositor::composite,
    algorithm::seam::compute_seam_mask,
    algorithm::selection::{score_candidates, select_candidate},
    io::configuration::MIN_OVERLAP_EXCLUSIVE,
    io::debug::{DebugCapture, DebugRasters},
    io::error::{Result, WithContext, computation_error, invalid_parameter},
    spatial::blocks::BlockLibrary,
    spatial::region::{self, Raster},
    spatial::shape::Placement,
};
use ndarray::{Array3, ArrayView3};
use rand::{SeedableRng, rngs::StdRng};

/// Synthesis parameters, validated before any work begins
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuiltConfig {
    /// Canvas width in pixels
    pub width: usize,
    /// Canvas height in pixels
    pub height: usize,
    /// Side length of the square candidate tiles
    pub tile_side: usize,
    /// Width of the strip shared with placed content
    pub overlap: usize,
    /// Stride between extracted candidate tiles
    pub step: usize,
    /// Fractional allowance above the best overlap cost
    pub tolerance: f64,
    /// Whether to add 90°, 180° and 270° rotations of every tile
    pub include_rotations: bool,
    /// Scoring threads; 0 uses one per CPU
    pub workers: usize,
}

impl QuiltConfig {
    /// Check every parameter constraint
    ///
    /// # Errors
    ///
    /// Returns an `InvalidParameter` error naming the first violated constraint
    pub fn validate(&self) -> Result<()> {
        if self.overlap <= MIN_OVERLAP_EXCLUSIVE {
            return Err(invalid_parameter(
                "overlap",
                &self.overlap,
                &format!("must exceed {MIN_OVERLAP_EXCLUSIVE}"),
            ));
        }

        let minimum = 2 * self.overlap;
        for (parameter, value) in [
            ("width", self.width),
            ("height", self.height),
            ("tile_side", self.tile_side),
        ] {
            if value <= minimum {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must exceed twice the overlap ({minimum})"),
                ));
            }
        }

        if self.step == 0 {
            return Err(invalid_parameter("step", &self.step, &"must be positive"));
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(invalid_parameter(
                "tolerance",
                &self.tolerance,
                &"must be a finite, non-negative fraction",
            ));
        }

        Ok(())
    }

    /// Scoring thread count with 0 resolved to the CPU count
    pub fn resolved_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }
}

/// Record of one completed placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRecord {
    /// Geometry of the placement
    pub placement: Placement,
    /// Index of the chosen candidate in the library
    pub tile_index: usize,
    /// Overlap cost of the chosen candidate
    pub overlap_cost: u64,
    /// Cost of the seam it was stitched along (0 without overlap)
    pub seam_cost: u64,
}

/// Final canvas and, in debug mode, the diagnostic rasters
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// The synthesized texture
    pub canvas: Raster,
    /// Diagnostic rasters when debug capture was enabled
    pub debug: Option<DebugRasters>,
}

/// Raster-order image quilting over a fixed canvas
///
/// Each step places one tile at the cursor: classify the overlap, score and
/// draw a candidate, cut the seam, composite, then advance. Placements are
/// strictly sequential since every seam depends on what the previous step
/// wrote.
pub struct Quilter {
    config: QuiltConfig,
    library: BlockLibrary,
    canvas: Raster,
    rng: StdRng,
    cursor: [usize; 2],
    workers: usize,
    history: Vec<PlacementRecord>,
    debug: Option<DebugCapture>,
}

impl Quilter {
    /// Validate `config`, extract the tile library from `source` and prepare an empty canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or no tile fits in the source
    pub fn new(source: &ArrayView3<'_, u8>, config: QuiltConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let library = BlockLibrary::extract(
            source,
            config.tile_side,
            config.step,
            config.include_rotations,
        )?;
        Ok(Self::from_library(library, config, StdRng::seed_from_u64(seed)))
    }

    /// Build a quilter over an existing library with an explicit random source
    ///
    /// The configuration is assumed valid; use [`QuiltConfig::validate`] first.
    pub fn from_library(library: BlockLibrary, config: QuiltConfig, rng: StdRng) -> Self {
        let channels = library
            .tiles()
            .first()
            .map_or(3, |tile| region::channels(&tile.pixels()));

        Self {
            canvas: Array3::zeros((config.height, config.width, channels)),
            workers: config.resolved_workers(),
            config,
            library,
            rng,
            cursor: [0, 0],
            history: Vec::new(),
            debug: None,
        }
    }

    /// Start capturing per-placement masks and seams
    pub fn enable_debug(&mut self) {
        self.debug = Some(DebugCapture::new(self.config.width, self.config.height));
    }

    /// Whether the cursor has reached the bottom-right corner of the canvas
    pub const fn is_complete(&self) -> bool {
        self.cursor[0] == self.config.width && self.cursor[1] == self.config.height
    }

    /// Place the tile at the current cursor
    ///
    /// Returns `false` once the canvas is filled, without placing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if scoring, the seam search or compositing fails
    pub fn execute_placement(&mut self) -> Result<bool> {
        if self.is_complete() {
            return Ok(false);
        }

        let placement = Placement::new(
            self.cursor,
            self.config.overlap,
            self.config.tile_side,
            (self.config.width, self.config.height),
        );

        let costs = score_candidates(
            &self.canvas,
            &placement,
            self.library.tiles(),
            self.workers,
        )?;
        let tile_index = select_candidate(&costs, self.config.tolerance, &mut self.rng)?;
        let overlap_cost = costs.get(tile_index).copied().unwrap_or_default();

        let Some(candidate) = self.library.get(tile_index) else {
            return Err(computation_error(
                "placement",
                &format!("selected tile {tile_index} is not in the library"),
            ));
        };
        let tile_pixels = candidate.pixels();
        let tile = region::view(&tile_pixels, placement.tile_rect())?;

        let cut = {
            let canvas = self.canvas.view();
            let canvas_region = region::view(&canvas, placement.rect)?;
            compute_seam_mask(placement.shape, placement.overlap, &canvas_region, &tile)
                .at_cursor(self.cursor)?
        };

        composite(&mut self.canvas, &tile, placement.rect, &cut.mask)?;

        if let Some(debug) = self.debug.as_mut() {
            debug.record(placement.rect, &cut)?;
        }

        self.history.push(PlacementRecord {
            placement,
            tile_index,
            overlap_cost,
            seam_cost: cut.cost,
        });
        self.advance(&placement);

        Ok(true)
    }

    // Move right by the clipped tile width; wrap to the row's bottom edge at the right edge
    const fn advance(&mut self, placement: &Placement) {
        self.cursor = match placement.end() {
            [x, y] if x == self.config.width && y < self.config.height => [0, y],
            [x, y] if x == self.config.width => [x, y],
            [x, _] => [x, self.cursor[1]],
        };
    }

    /// Place tiles until the canvas is filled
    ///
    /// # Errors
    ///
    /// Returns the first placement error
    pub fn run(&mut self) -> Result<()> {
        while self.execute_placement()? {}
        Ok(())
    }

    /// Consume the quilter, returning the canvas and any debug rasters
    pub fn finish(self) -> SynthesisOutput {
        let debug = self
            .debug
            .map(|capture| capture.into_rasters(&self.library));
        SynthesisOutput {
            canvas: self.canvas,
            debug,
        }
    }

    /// Current placement cursor
    pub const fn cursor(&self) -> [usize; 2] {
        self.cursor
    }

    /// Canvas as composited so far
    pub const fn canvas(&self) -> &Raster {
        &self.canvas
    }

    /// Candidate tiles in use
    pub const fn library(&self) -> &BlockLibrary {
        &self.library
    }

    /// Configuration in use
    pub const fn config(&self) -> &QuiltConfig {
        &self.config
    }

    /// Every placement made so far, in order
    pub fn history(&self) -> &[PlacementRecord] {
        &self.history
    }

    /// Pixel rows covered by completed placement rows
    pub const fn rows_completed(&self) -> usize {
        self.cursor[1]
    }
}
