//! Candidate tile extraction from the source texture
//!
//! Slides a square window across the source in raster order and keeps every
//! full-size block. Rotation variants can be appended to widen the pool drawn
//! from a small source.

use ndarray::ArrayView3;

use crate::io::error::{QuiltError, Result, invalid_parameter};
use crate::spatial::region::{self, Raster, Rect};

/// A square block sampled from the source texture
#[derive(Debug, Clone)]
pub struct CandidateTile {
    pixels: Raster,
    origin: [usize; 2],
    rotation: u8,
}

impl CandidateTile {
    /// Tile pixels, already rotated
    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// Source position (x, y) the block was cropped from
    pub const fn origin(&self) -> [usize; 2] {
        self.origin
    }

    /// Clockwise quarter turns applied after cropping (0 for the original block)
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Side length in pixels
    pub fn side(&self) -> usize {
        self.pixels.dim().0
    }
}

/// The immutable pool of candidate tiles for one synthesis run
#[derive(Debug, Clone)]
pub struct BlockLibrary {
    tiles: Vec<CandidateTile>,
    tile_side: usize,
}

impl BlockLibrary {
    /// Extract `tile_side` blocks every `step` pixels from `source`
    ///
    /// Blocks that would run past the source edge are skipped. With
    /// `include_rotations` each block is followed by its 90°, 180° and 270°
    /// rotations.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` or `tile_side` is zero, or if the source is
    /// smaller than one tile so nothing can be extracted
    pub fn extract(
        source: &ArrayView3<'_, u8>,
        tile_side: usize,
        step: usize,
        include_rotations: bool,
    ) -> Result<Self> {
        if step == 0 {
            return Err(invalid_parameter("step", &step, &"must be positive"));
        }
        if tile_side == 0 {
            return Err(invalid_parameter("tile_side", &tile_side, &"must be positive"));
        }

        let (width, height) = region::dimensions(source);
        let mut tiles = Vec::new();

        if width >= tile_side && height >= tile_side {
            for y in (0..=height - tile_side).step_by(step) {
                for x in (0..=width - tile_side).step_by(step) {
                    let block = region::view(source, Rect::new(x, y, tile_side, tile_side))?;
                    let turns: &[u8] = if include_rotations { &[0, 1, 2, 3] } else { &[0] };
                    for &rotation in turns {
                        tiles.push(CandidateTile {
                            pixels: region::rotate_quarter_turns(&block, rotation),
                            origin: [x, y],
                            rotation,
                        });
                    }
                }
            }
        }

        if tiles.is_empty() {
            return Err(QuiltError::EmptyLibrary {
                source_dimensions: (width, height),
                tile_side,
                step,
            });
        }

        Ok(Self { tiles, tile_side })
    }

    /// All candidate tiles in extraction order
    pub fn tiles(&self) -> &[CandidateTile] {
        &self.tiles
    }

    /// Candidate at `index`
    pub fn get(&self, index: usize) -> Option<&CandidateTile> {
        self.tiles.get(index)
    }

    /// Number of candidates
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the library holds no candidates (never true once extracted)
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Side length shared by every candidate
    pub const fn tile_side(&self) -> usize {
        self.tile_side
    }
}
