//! Minimum-error boundary cut through the overlap region
//!
//! The overlap between an incoming tile and the canvas is modeled as an
//! implicit 4-connected grid whose nodes are overlap pixels. Visiting a node
//! costs the squared color distance between the two images at that pixel. A
//! Dijkstra search runs from every START node (one outer edge of the overlap)
//! to the cheapest END node (the opposite outer edge); the resulting path is
//! the seam. A flood fill from the old-content boundary that never crosses the
//! seam then decides which pixels keep the canvas.
//!
//! Adjacency follows the overlap region itself rather than its bounding box, so
//! for a corner overlap nodes on the far edge of one strip never gain a
//! neighbor through the uncovered block in the bottom right.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ndarray::{Array2, ArrayView3};

use crate::io::error::{Result, computation_error, seam_invariant};
use crate::spatial::mask::SeamMask;
use crate::spatial::region;
use crate::spatial::shape::OverlapShape;

/// Role of a node in the seam search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Interior overlap pixel, or a pixel outside the overlap
    Ordinary,
    /// On the edge the seam starts from
    Start,
    /// On the edge the seam ends at
    End,
    /// Part of the reconstructed seam
    Path,
}

/// A pixel of the overlap grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridNode {
    /// Column within the grid
    pub x: usize,
    /// Row within the grid
    pub y: usize,
    /// Tentative cumulative cost; `u64::MAX` until first reached
    pub cost: u64,
    /// Squared color distance at this pixel
    pub pixel_cost: u64,
    /// Role tag
    pub role: NodeRole,
    /// Whether the cost is final
    pub settled: bool,
    /// Node this one was reached from on its cheapest known path
    pub predecessor: Option<[usize; 2]>,
}

/// The reconstructed seam, ordered from its START node to its END node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam {
    /// Grid coordinates `[x, y]` of every seam node
    pub nodes: Vec<[usize; 2]>,
    /// Total pixel cost along the seam
    pub cost: u64,
}

impl Seam {
    /// First node of the seam
    pub fn start(&self) -> Option<[usize; 2]> {
        self.nodes.first().copied()
    }

    /// Last node of the seam
    pub fn end(&self) -> Option<[usize; 2]> {
        self.nodes.last().copied()
    }
}

/// Output of one seam computation
#[derive(Debug, Clone)]
pub struct SeamCut {
    /// Compositing mask over the clipped tile
    pub mask: SeamMask,
    /// Seam in tile-local coordinates; empty when there was no overlap
    pub seam: Vec<[usize; 2]>,
    /// Seam cost; zero when there was no overlap
    pub cost: u64,
}

/// Overlap grid owned by a single seam computation
#[derive(Debug, Clone)]
pub struct SeamGrid {
    shape: OverlapShape,
    overlap: usize,
    width: usize,
    height: usize,
    nodes: Array2<GridNode>,
}

impl SeamGrid {
    /// Build the grid for `shape` over two equally sized tile-footprint regions
    ///
    /// `canvas` and `tile` are the canvas pixels under the placement and the
    /// clipped incoming tile. The grid is anchored at their top-left corner.
    ///
    /// # Errors
    ///
    /// Returns an error if the two regions differ in shape
    pub fn new(
        shape: OverlapShape,
        overlap: usize,
        canvas: &ArrayView3<'_, u8>,
        tile: &ArrayView3<'_, u8>,
    ) -> Result<Self> {
        if canvas.dim() != tile.dim() {
            return Err(computation_error(
                "seam grid",
                &format!(
                    "canvas region {:?} does not match tile {:?}",
                    canvas.dim(),
                    tile.dim()
                ),
            ));
        }

        let (tile_width, tile_height) = region::dimensions(canvas);
        let (width, height) = shape.grid_extent(overlap, tile_width, tile_height);

        let mut grid = Self {
            shape,
            overlap,
            width,
            height,
            nodes: Array2::from_shape_fn((height, width), |(y, x)| GridNode::ordinary(x, y)),
        };

        for y in 0..height {
            for x in 0..width {
                if !grid.is_member(x, y) {
                    continue;
                }
                let role = if grid.is_start_edge(x, y) {
                    NodeRole::Start
                } else if grid.is_end_edge(x, y) {
                    NodeRole::End
                } else {
                    NodeRole::Ordinary
                };
                let pixel_cost = region::pixel_distance(canvas, tile, x, y);
                if let Some(node) = grid.nodes.get_mut([y, x]) {
                    node.pixel_cost = pixel_cost;
                    node.role = role;
                }
            }
        }

        Ok(grid)
    }

    /// Overlap shape the grid was built for
    pub const fn shape(&self) -> OverlapShape {
        self.shape
    }

    /// Grid extent as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Node at `(x, y)`
    pub fn node(&self, x: usize, y: usize) -> Option<&GridNode> {
        self.nodes.get([y, x])
    }

    /// Whether `(x, y)` is an overlap pixel inside the grid
    pub const fn is_member(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.shape.contains(x, y, self.overlap)
    }

    /// Whether `(x, y)` lies on the edge the seam starts from
    ///
    /// Horizontal seams start on the left column, vertical seams on the bottom
    /// row, and corner seams on the bottom row of the left strip.
    pub const fn is_start_edge(&self, x: usize, y: usize) -> bool {
        if !self.is_member(x, y) {
            return false;
        }
        match self.shape {
            OverlapShape::None => false,
            OverlapShape::Horizontal => x == 0,
            OverlapShape::Vertical | OverlapShape::Corner => y + 1 == self.height,
        }
    }

    /// Whether `(x, y)` lies on the edge the seam ends at
    ///
    /// Horizontal and corner seams end on the right column of the top strip,
    /// vertical seams on the top row.
    pub const fn is_end_edge(&self, x: usize, y: usize) -> bool {
        if !self.is_member(x, y) {
            return false;
        }
        match self.shape {
            OverlapShape::None => false,
            OverlapShape::Horizontal | OverlapShape::Corner => x + 1 == self.width,
            OverlapShape::Vertical => y == 0,
        }
    }

    // Distance from the old-content side along a START or END edge
    const fn edge_position(&self, x: usize, y: usize) -> usize {
        match self.shape {
            OverlapShape::Vertical => x,
            OverlapShape::Corner if y + 1 == self.height => x,
            _ => y,
        }
    }

    /// Overlap neighbors of `(x, y)` in up, left, down, right order
    pub fn neighbors(&self, x: usize, y: usize) -> [Option<[usize; 2]>; 4] {
        [
            y.checked_sub(1).map(|ny| [x, ny]),
            x.checked_sub(1).map(|nx| [nx, y]),
            Some([x, y + 1]),
            Some([x + 1, y]),
        ]
        .map(|candidate| candidate.filter(|&[nx, ny]| self.is_member(nx, ny)))
    }

    /// START nodes in edge order
    pub fn start_nodes(&self) -> Vec<[usize; 2]> {
        self.edge_nodes(Self::is_start_edge)
    }

    /// END nodes in edge order
    pub fn end_nodes(&self) -> Vec<[usize; 2]> {
        self.edge_nodes(Self::is_end_edge)
    }

    fn edge_nodes(&self, on_edge: impl Fn(&Self, usize, usize) -> bool) -> Vec<[usize; 2]> {
        let mut nodes: Vec<[usize; 2]> = self
            .nodes
            .indexed_iter()
            .filter(|&((y, x), _)| on_edge(self, x, y))
            .map(|((y, x), _)| [x, y])
            .collect();
        nodes.sort_by_key(|&[x, y]| self.edge_position(x, y));
        nodes
    }

    /// Find the minimum-cost seam and mark its nodes as PATH
    ///
    /// Every START node is seeded with its own pixel cost. Decreased keys are
    /// pushed as fresh heap entries; a pop of an already settled node is
    /// skipped, so only the cheapest entry per node is honored. The seam ends
    /// at the cheapest settled END node, the first in edge order on ties.
    ///
    /// # Errors
    ///
    /// Returns an error if no END node is reachable or if the predecessor
    /// chain does not lead back to a START node
    pub fn search(&mut self) -> Result<Seam> {
        let mut queue: BinaryHeap<Reverse<(u64, usize, usize)>> = BinaryHeap::new();

        for [x, y] in self.start_nodes() {
            if let Some(node) = self.nodes.get_mut([y, x]) {
                node.cost = node.pixel_cost;
                queue.push(Reverse((node.cost, y, x)));
            }
        }

        while let Some(Reverse((cost, y, x))) = queue.pop() {
            match self.nodes.get_mut([y, x]) {
                Some(node) if !node.settled => node.settled = true,
                _ => continue,
            }

            for [nx, ny] in self.neighbors(x, y).into_iter().flatten() {
                let Some(neighbor) = self.nodes.get_mut([ny, nx]) else {
                    continue;
                };
                if neighbor.settled {
                    continue;
                }
                let candidate = cost.saturating_add(neighbor.pixel_cost);
                if candidate < neighbor.cost {
                    neighbor.cost = candidate;
                    neighbor.predecessor = Some([x, y]);
                    queue.push(Reverse((candidate, ny, nx)));
                }
            }
        }

        let mut end: Option<([usize; 2], u64)> = None;
        for [x, y] in self.end_nodes() {
            let Some(node) = self.node(x, y) else {
                continue;
            };
            if node.settled && end.is_none_or(|(_, best)| node.cost < best) {
                end = Some(([x, y], node.cost));
            }
        }
        let Some((end, cost)) = end else {
            return Err(seam_invariant(&format!(
                "no END node reachable in {:?} overlap grid of {}x{}",
                self.shape, self.width, self.height
            )));
        };

        let mut nodes = Vec::new();
        let mut current = Some(end);
        while let Some([x, y]) = current {
            if nodes.len() > self.nodes.len() {
                return Err(seam_invariant(&"predecessor chain contains a cycle"));
            }
            let Some(node) = self.node(x, y) else {
                return Err(seam_invariant(&format!(
                    "predecessor ({x}, {y}) lies outside the grid"
                )));
            };
            nodes.push([x, y]);
            if node.predecessor.is_none() && !self.is_start_edge(x, y) {
                return Err(seam_invariant(&format!(
                    "seam traced back to ({x}, {y}), which is not a START node"
                )));
            }
            current = node.predecessor;
        }
        nodes.reverse();

        for &[x, y] in &nodes {
            if let Some(node) = self.nodes.get_mut([y, x]) {
                node.role = NodeRole::Path;
            }
        }

        Ok(Seam { nodes, cost })
    }

    /// Derive the compositing mask for a `tile_width` x `tile_height` tile
    ///
    /// The fill is seeded from every non-PATH node on the old-content
    /// boundary: the top row and left column where the tile overlaps existing
    /// content, plus the START and END edge nodes between that boundary and
    /// the seam endpoints. It moves along overlap adjacency without stepping
    /// onto PATH nodes. Filled nodes and the seam keep the canvas; everything
    /// else, including the non-overlapping remainder, takes the tile.
    ///
    /// # Errors
    ///
    /// Returns an error if the seam is empty or the fill reaches a START or
    /// END node beyond the seam, which would mean the seam failed to split the
    /// overlap in two
    pub fn derive_mask(&self, seam: &Seam, tile_width: usize, tile_height: usize) -> Result<SeamMask> {
        let (Some([start_x, start_y]), Some([end_x, end_y])) = (seam.start(), seam.end()) else {
            return Err(seam_invariant(&"cannot derive a mask from an empty seam"));
        };
        let start_position = self.edge_position(start_x, start_y);
        let end_position = self.edge_position(end_x, end_y);

        let mut mask = SeamMask::use_tile(tile_width, tile_height);
        let mut visited = Array2::from_elem((self.height, self.width), false);
        let mut stack = Vec::new();

        for ((y, x), node) in self.nodes.indexed_iter() {
            if !self.is_member(x, y) || node.role == NodeRole::Path {
                continue;
            }
            let on_old_boundary = (self.shape.has_top() && y == 0)
                || (self.shape.has_left() && x == 0)
                || (self.is_start_edge(x, y) && self.edge_position(x, y) < start_position)
                || (self.is_end_edge(x, y) && self.edge_position(x, y) < end_position);
            if on_old_boundary {
                if let Some(seen) = visited.get_mut([y, x]) {
                    *seen = true;
                }
                stack.push([x, y]);
            }
        }

        while let Some([x, y]) = stack.pop() {
            let beyond_start = self.is_start_edge(x, y) && self.edge_position(x, y) > start_position;
            let beyond_end = self.is_end_edge(x, y) && self.edge_position(x, y) > end_position;
            if beyond_start || beyond_end {
                return Err(seam_invariant(&format!(
                    "flood fill crossed the seam and reached ({x}, {y})"
                )));
            }
            mask.keep_canvas(x, y);

            for [nx, ny] in self.neighbors(x, y).into_iter().flatten() {
                let crossable = self
                    .node(nx, ny)
                    .is_some_and(|node| node.role != NodeRole::Path);
                if crossable
                    && let Some(seen) = visited.get_mut([ny, nx])
                    && !*seen
                {
                    *seen = true;
                    stack.push([nx, ny]);
                }
            }
        }

        for &[x, y] in &seam.nodes {
            mask.keep_canvas(x, y);
        }

        Ok(mask)
    }
}

impl GridNode {
    const fn ordinary(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            cost: u64::MAX,
            pixel_cost: 0,
            role: NodeRole::Ordinary,
            settled: false,
            predecessor: None,
        }
    }
}

/// Compute the seam and compositing mask for one placement
///
/// `canvas` and `tile` must both cover the clipped placement rectangle. The
/// grid lives only for the duration of this call. A NONE shape skips the
/// search and takes the whole tile.
///
/// # Errors
///
/// Returns an error if the regions differ in shape or the seam search breaks
/// one of its structural invariants
pub fn compute_seam_mask(
    shape: OverlapShape,
    overlap: usize,
    canvas: &ArrayView3<'_, u8>,
    tile: &ArrayView3<'_, u8>,
) -> Result<SeamCut> {
    let (width, height) = region::dimensions(tile);

    if shape == OverlapShape::None {
        return Ok(SeamCut {
            mask: SeamMask::use_tile(width, height),
            seam: Vec::new(),
            cost: 0,
        });
    }

    let mut grid = SeamGrid::new(shape, overlap, canvas, tile)?;
    let seam = grid.search()?;
    let mask = grid.derive_mask(&seam, width, height)?;

    Ok(SeamCut {
        mask,
        seam: seam.nodes,
        cost: seam.cost,
    })
}
