//! Raster buffers, sub-rectangle views and pixel-difference reductions
//!
//! Rasters are `(rows, cols, channels)` byte arrays. Every view handed out by
//! this module is produced from a [`Rect`] that has already been clipped to the
//! raster, so slicing never reaches outside the buffer.

use ndarray::{Array3, ArrayView3, ArrayViewMut3, Axis, Zip, s};

use crate::io::error::{Result, computation_error};

/// A multi-channel byte raster laid out as `(rows, cols, channels)`
pub type Raster = Array3<u8>;

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left column (inclusive)
    pub x: usize,
    /// Top row (inclusive)
    pub y: usize,
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl Rect {
    /// Create a rectangle from its origin and size
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shift the rectangle by `(dx, dy)`
    #[must_use]
    pub const fn translate(&self, dx: usize, dy: usize) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Clip the rectangle to a `width` x `height` area anchored at the origin
    #[must_use]
    pub fn clip_to(&self, width: usize, height: usize) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self::new(
            x,
            y,
            self.width.min(width - x),
            self.height.min(height - y),
        )
    }

    /// Whether the rectangle lies fully inside a `width` x `height` area
    pub const fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x + self.width <= width && self.y + self.height <= height
    }
}

/// Raster dimensions as `(width, height)`
pub fn dimensions(raster: &ArrayView3<'_, u8>) -> (usize, usize) {
    let (rows, cols, _) = raster.dim();
    (cols, rows)
}

/// Number of channels per pixel
pub fn channels(raster: &ArrayView3<'_, u8>) -> usize {
    raster.len_of(Axis(2))
}

/// Read-only view of `rect` inside `raster`
///
/// # Errors
///
/// Returns an error if `rect` does not fit inside the raster
pub fn view<'a>(raster: &ArrayView3<'a, u8>, rect: Rect) -> Result<ArrayView3<'a, u8>> {
    let (width, height) = dimensions(raster);
    if !rect.fits_within(width, height) {
        return Err(computation_error(
            "region view",
            &format!("{rect:?} exceeds {width}x{height} raster"),
        ));
    }
    Ok((*raster).slice_move(s![
        rect.y..rect.y + rect.height,
        rect.x..rect.x + rect.width,
        ..
    ]))
}

/// Mutable view of `rect` inside `raster`
///
/// # Errors
///
/// Returns an error if `rect` does not fit inside the raster
pub fn view_mut(raster: &mut Raster, rect: Rect) -> Result<ArrayViewMut3<'_, u8>> {
    let (rows, cols, _) = raster.dim();
    if !rect.fits_within(cols, rows) {
        return Err(computation_error(
            "region view",
            &format!("{rect:?} exceeds {cols}x{rows} raster"),
        ));
    }
    Ok(raster.slice_mut(s![
        rect.y..rect.y + rect.height,
        rect.x..rect.x + rect.width,
        ..
    ]))
}

/// Squared color distance between two pixels, summed over channels
pub fn pixel_distance(a: &ArrayView3<'_, u8>, b: &ArrayView3<'_, u8>, x: usize, y: usize) -> u64 {
    let (Some(lane_a), Some(lane_b)) = (pixel(a, x, y), pixel(b, x, y)) else {
        return 0;
    };
    lane_a
        .iter()
        .zip(lane_b.iter())
        .map(|(&va, &vb)| {
            let diff = u64::from(va.abs_diff(vb));
            diff * diff
        })
        .sum()
}

fn pixel<'a>(
    raster: &'a ArrayView3<'_, u8>,
    x: usize,
    y: usize,
) -> Option<ndarray::ArrayView1<'a, u8>> {
    let (rows, cols, _) = raster.dim();
    (y < rows && x < cols).then(|| raster.slice(s![y, x, ..]))
}

/// Sum of squared differences over two equally shaped regions
///
/// # Errors
///
/// Returns an error if the regions differ in shape
pub fn sum_squared_difference(a: &ArrayView3<'_, u8>, b: &ArrayView3<'_, u8>) -> Result<u64> {
    if a.dim() != b.dim() {
        return Err(computation_error(
            "sum of squared differences",
            &format!("shape {:?} does not match {:?}", a.dim(), b.dim()),
        ));
    }
    Ok(Zip::from(a).and(b).fold(0_u64, |acc, &va, &vb| {
        let diff = u64::from(va.abs_diff(vb));
        acc + diff * diff
    }))
}

/// Rotate a raster a quarter turn clockwise, `turns` times
pub fn rotate_quarter_turns(raster: &ArrayView3<'_, u8>, turns: u8) -> Raster {
    let mut rotated = raster.to_owned();
    for _ in 0..turns % 4 {
        let mut flipped = rotated.view();
        flipped.invert_axis(Axis(0));
        rotated = flipped
            .permuted_axes([1, 0, 2])
            .as_standard_layout()
            .into_owned();
    }
    rotated
}
