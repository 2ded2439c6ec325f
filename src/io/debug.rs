//! Diagnostic rasters describing a synthesis run
//!
//! Captured only when debug output is enabled and handed back with the final
//! canvas; nothing here is needed to produce the result itself.

use std::path::{Path, PathBuf};

use ndarray::{Array3, s};

use crate::algorithm::seam::SeamCut;
use crate::io::configuration::{BLOCKS_SUFFIX, MASK_SUFFIX, MOSAIC_GUTTER, SEAMS_SUFFIX};
use crate::io::error::Result;
use crate::io::image::save_raster;
use crate::spatial::blocks::BlockLibrary;
use crate::spatial::region::{self, Raster, Rect};

const WHITE: u8 = u8::MAX;
const BLACK: u8 = 0;

/// The three diagnostic rasters of a run
#[derive(Debug, Clone)]
pub struct DebugRasters {
    /// Every candidate tile laid out on a grid
    pub tile_mosaic: Raster,
    /// Per-placement masks: white where the tile was taken, black where the canvas was kept
    pub mask_overlay: Raster,
    /// Per-placement seams drawn black on white
    pub seam_overlay: Raster,
}

/// Records masks and seams as placements are composited
#[derive(Debug, Clone)]
pub struct DebugCapture {
    mask_overlay: Raster,
    seam_overlay: Raster,
}

impl DebugCapture {
    /// Create single-channel overlays for a `width` x `height` canvas
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            mask_overlay: Array3::zeros((height, width, 1)),
            seam_overlay: Array3::from_elem((height, width, 1), WHITE),
        }
    }

    /// Record the mask and seam of the placement covering `rect`
    ///
    /// Later placements overwrite the overlap they share with earlier ones,
    /// matching what the canvas shows.
    ///
    /// # Errors
    ///
    /// Returns an error if `rect` exceeds the canvas
    pub fn record(&mut self, rect: Rect, cut: &SeamCut) -> Result<()> {
        let mut mask_region = region::view_mut(&mut self.mask_overlay, rect)?;
        for ((y, x, _), value) in mask_region.indexed_iter_mut() {
            *value = if cut.mask.takes_tile(x, y) { WHITE } else { BLACK };
        }

        let mut seam_region = region::view_mut(&mut self.seam_overlay, rect)?;
        seam_region.fill(WHITE);
        for &[x, y] in &cut.seam {
            if let Some(value) = seam_region.get_mut((y, x, 0)) {
                *value = BLACK;
            }
        }

        Ok(())
    }

    /// Finish the capture, pairing the overlays with the tile mosaic
    pub fn into_rasters(self, library: &BlockLibrary) -> DebugRasters {
        DebugRasters {
            tile_mosaic: tile_mosaic(library),
            mask_overlay: self.mask_overlay,
            seam_overlay: self.seam_overlay,
        }
    }
}

/// Lay every candidate tile out on a near-square grid separated by a gutter
pub fn tile_mosaic(library: &BlockLibrary) -> Raster {
    let side = library.tile_side();
    let count = library.len();
    let channels = library
        .tiles()
        .first()
        .map_or(1, |tile| region::channels(&tile.pixels()));

    let columns = (count as f64).sqrt().ceil().max(1.0) as usize;
    let rows = count.div_ceil(columns).max(1);
    let pitch = side + MOSAIC_GUTTER;
    let mut mosaic = Array3::zeros((rows * pitch - MOSAIC_GUTTER, columns * pitch - MOSAIC_GUTTER, channels));

    for (index, tile) in library.tiles().iter().enumerate() {
        let x = (index % columns) * pitch;
        let y = (index / columns) * pitch;
        mosaic
            .slice_mut(s![y..y + side, x..x + side, ..])
            .assign(&tile.pixels());
    }

    mosaic
}

/// Write the debug rasters next to `output`, returning the written paths
///
/// # Errors
///
/// Returns an error if any raster cannot be written
pub fn write_debug_rasters(rasters: &DebugRasters, output: &Path) -> Result<Vec<PathBuf>> {
    let targets = [
        (&rasters.tile_mosaic, BLOCKS_SUFFIX),
        (&rasters.mask_overlay, MASK_SUFFIX),
        (&rasters.seam_overlay, SEAMS_SUFFIX),
    ];

    let mut written = Vec::with_capacity(targets.len());
    for (raster, suffix) in targets {
        let path = sibling_path(output, suffix);
        save_raster(raster, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// `output` with `suffix` appended to its file stem
pub fn sibling_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output.file_stem().unwrap_or_default();
    let extension = output
        .extension()
        .map_or_else(|| "png".to_string(), |ext| ext.to_string_lossy().to_string());
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    output
        .parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}
