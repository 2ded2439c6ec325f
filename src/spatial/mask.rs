//! Binary compositing masks

use bitvec::vec::BitVec;

/// Per-pixel selector over a placed tile's footprint
///
/// A set bit takes the incoming tile pixel, a cleared bit keeps the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeamMask {
    width: usize,
    height: usize,
    bits: BitVec,
}

impl SeamMask {
    /// A mask that takes every tile pixel
    pub fn use_tile(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: bitvec::bitvec![1; width * height],
        }
    }

    /// Mask width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether pixel `(x, y)` takes the incoming tile; out of range reads as `false`
    pub fn takes_tile(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .and_then(|i| self.bits.get(i).map(|bit| *bit))
            .unwrap_or(false)
    }

    /// Mark pixel `(x, y)` as keeping the existing canvas
    pub fn keep_canvas(&mut self, x: usize, y: usize) {
        if let Some(i) = self.index(x, y) {
            self.bits.set(i, false);
        }
    }

    /// Number of pixels taken from the tile
    pub fn tile_pixel_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of pixels kept from the canvas
    pub fn canvas_pixel_count(&self) -> usize {
        self.bits.count_zeros()
    }

    const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}
