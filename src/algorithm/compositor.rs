//! Masked merge of a chosen tile into the canvas

use ndarray::{ArrayView3, Axis, Zip};

use crate::io::error::{Result, computation_error};
use crate::spatial::mask::SeamMask;
use crate::spatial::region::{self, Raster, Rect};

/// Write `tile` into `canvas` at `rect` wherever `mask` takes the tile
///
/// `rect` is the clipped placement rectangle and `tile` the tile clipped to
/// the same size. Pixels whose mask bit is cleared are left untouched.
///
/// # Errors
///
/// Returns an error if `rect` exceeds the canvas or the tile and mask do not
/// match its size
pub fn composite(
    canvas: &mut Raster,
    tile: &ArrayView3<'_, u8>,
    rect: Rect,
    mask: &SeamMask,
) -> Result<()> {
    let (tile_width, tile_height) = region::dimensions(tile);
    if (tile_width, tile_height) != (rect.width, rect.height)
        || (mask.width(), mask.height()) != (rect.width, rect.height)
    {
        return Err(computation_error(
            "composite",
            &format!(
                "tile {tile_width}x{tile_height} and mask {}x{} must match placement {}x{}",
                mask.width(),
                mask.height(),
                rect.width,
                rect.height
            ),
        ));
    }

    let mut target = region::view_mut(canvas, rect)?;
    if target.dim() != tile.dim() {
        return Err(computation_error(
            "composite",
            &format!("canvas channels {:?} differ from tile {:?}", target.dim(), tile.dim()),
        ));
    }

    Zip::indexed(target.lanes_mut(Axis(2)))
        .and(tile.lanes(Axis(2)))
        .for_each(|(y, x), mut dst, src| {
            if mask.takes_tile(x, y) {
                dst.assign(&src);
            }
        });

    Ok(())
}
