/// Command-line interface and run processing
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Diagnostic rasters
pub mod debug;
/// Error types and context
pub mod error;
/// Raster decode and encode
pub mod image;
/// Progress display
pub mod progress;
