//! Overlap geometry for a single placement
//!
//! The overlap shape is classified once from the placement cursor and every
//! later step (cost strips, grid extent, seam endpoints, mask region) is
//! dispatched from that one value.

use crate::spatial::region::Rect;

/// Geometry of the region a new tile shares with already placed content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlapShape {
    /// Nothing placed above or to the left; the tile is copied as is
    None,
    /// A strip of height `L` along the top of the tile
    Horizontal,
    /// A strip of width `L` along the left of the tile
    Vertical,
    /// The L-shaped union of the top strip and the left strip
    Corner,
}

impl OverlapShape {
    /// Classify a cursor position against the overlap length
    pub const fn classify(cursor: [usize; 2], overlap: usize) -> Self {
        match (cursor[0] > overlap, cursor[1] > overlap) {
            (false, false) => Self::None,
            (false, true) => Self::Horizontal,
            (true, false) => Self::Vertical,
            (true, true) => Self::Corner,
        }
    }

    /// Whether the tile overlaps content above it
    pub const fn has_top(self) -> bool {
        matches!(self, Self::Horizontal | Self::Corner)
    }

    /// Whether the tile overlaps content to its left
    pub const fn has_left(self) -> bool {
        matches!(self, Self::Vertical | Self::Corner)
    }

    /// Whether tile-local pixel `(x, y)` lies in the overlap region
    pub const fn contains(self, x: usize, y: usize, overlap: usize) -> bool {
        (self.has_top() && y < overlap) || (self.has_left() && x < overlap)
    }

    /// Bounding extent `(width, height)` of the overlap region for a `width` x `height` tile
    pub fn grid_extent(self, overlap: usize, width: usize, height: usize) -> (usize, usize) {
        match self {
            Self::None => (0, 0),
            Self::Horizontal => (width, overlap.min(height)),
            Self::Vertical => (overlap.min(width), height),
            Self::Corner => (width, height),
        }
    }

    /// Tile-local strips compared during scoring
    ///
    /// For a corner the left strip starts below the top strip so the shared
    /// `L` x `L` block is counted once.
    pub fn strips(self, overlap: usize, width: usize, height: usize) -> Vec<Rect> {
        let top = Rect::new(0, 0, width, overlap.min(height));
        match self {
            Self::None => Vec::new(),
            Self::Horizontal => vec![top],
            Self::Vertical => vec![Rect::new(0, 0, overlap.min(width), height)],
            Self::Corner => vec![
                top,
                Rect::new(
                    0,
                    overlap.min(height),
                    overlap.min(width),
                    height.saturating_sub(overlap),
                ),
            ],
        }
    }
}

/// A tile placement derived from the raster-order cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Cursor that produced this placement
    pub cursor: [usize; 2],
    /// Overlap shape classified from the cursor
    pub shape: OverlapShape,
    /// Canvas rectangle the tile occupies, clipped to the canvas
    pub rect: Rect,
    /// Overlap length
    pub overlap: usize,
}

impl Placement {
    /// Derive the placement for `cursor` on a `canvas` of `(width, height)`
    ///
    /// The tile origin is pulled back by the overlap length along every axis
    /// on which the cursor has already passed the overlap.
    pub fn new(cursor: [usize; 2], overlap: usize, tile_side: usize, canvas: (usize, usize)) -> Self {
        let shape = OverlapShape::classify(cursor, overlap);
        let x = if shape.has_left() {
            cursor[0] - overlap
        } else {
            cursor[0]
        };
        let y = if shape.has_top() {
            cursor[1] - overlap
        } else {
            cursor[1]
        };
        let rect = Rect::new(x, y, tile_side, tile_side).clip_to(canvas.0, canvas.1);

        Self {
            cursor,
            shape,
            rect,
            overlap,
        }
    }

    /// Tile-local rectangle of the clipped tile
    pub const fn tile_rect(&self) -> Rect {
        Rect::new(0, 0, self.rect.width, self.rect.height)
    }

    /// Tile-local strips compared during scoring
    pub fn strips(&self) -> Vec<Rect> {
        self.shape
            .strips(self.overlap, self.rect.width, self.rect.height)
    }

    /// Far corner of the placed tile, which becomes the next cursor
    pub const fn end(&self) -> [usize; 2] {
        [self.rect.x + self.rect.width, self.rect.y + self.rect.height]
    }
}
