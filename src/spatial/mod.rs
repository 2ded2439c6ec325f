//! Spatial data structures for quilting
//!
//! This module contains:
//! - Raster regions and pixel-difference reductions
//! - Overlap shape classification and placement geometry
//! - Binary compositing masks
//! - Candidate tile extraction

/// Candidate tile extraction from the source texture
pub mod blocks;
/// Binary compositing masks
pub mod mask;
/// Raster buffers, views and reductions
pub mod region;
/// Overlap geometry for a single placement
pub mod shape;

pub use region::{Raster, Rect};
