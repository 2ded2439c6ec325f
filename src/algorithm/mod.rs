/// Masked merge of chosen tiles into the canvas
pub mod compositor;
/// Placement orchestration in raster order
pub mod executor;
/// Minimum-error boundary cut and mask derivation
pub mod seam;
/// Overlap scoring and tolerance-based candidate selection
pub mod selection;
