//! Texture synthesis by image quilting
//!
//! Blocks sampled from a source texture are tiled over a canvas in raster
//! order. Each block is drawn among the candidates whose overlap with placed
//! content is close to the best match, then stitched in along a
//! minimum-error boundary cut found by a shortest-path search over the
//! overlap.

/// Seam search, candidate selection, compositing and placement orchestration
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Raster regions, overlap geometry, masks and the candidate tile library
pub mod spatial;

pub use algorithm::executor::{QuiltConfig, Quilter, SynthesisOutput};
pub use io::error::{QuiltError, Result};
