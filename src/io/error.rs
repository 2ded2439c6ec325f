//! Error types and context management for quilting operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all quilting operations
#[derive(Debug)]
pub enum QuiltError {
    /// Failed to load the source texture from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Parameter validation failed before synthesis started
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Block extraction produced no candidate tiles
    EmptyLibrary {
        /// Source texture dimensions (width, height)
        source_dimensions: (usize, usize),
        /// Configured tile side length
        tile_side: usize,
        /// Configured sampling step
        step: usize,
    },

    /// The seam search or mask derivation broke one of its structural guarantees
    ///
    /// Raised when no END node is reachable from any START node, or when the
    /// flood fill crosses to the far side of the seam. Both point at an
    /// adjacency defect and are never retried.
    SeamInvariant {
        /// Placement cursor (x, y) when known
        cursor: Option<[usize; 2]>,
        /// Description of the violated invariant
        reason: String,
    },

    /// Failed to save a raster to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Buffer computation failed
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for QuiltError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::EmptyLibrary {
                source_dimensions,
                tile_side,
                step,
            } => {
                write!(
                    f,
                    "No {tile_side}x{tile_side} tiles could be extracted from a {}x{} source with step {step}",
                    source_dimensions.0, source_dimensions.1
                )
            }
            Self::SeamInvariant { cursor, reason } => match cursor {
                Some([x, y]) => write!(f, "Seam invariant violated at cursor ({x}, {y}): {reason}"),
                None => write!(f, "Seam invariant violated: {reason}"),
            },
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for QuiltError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for quilting results
pub type Result<T> = std::result::Result<T, QuiltError>;

/// Attaches placement state to errors raised below the orchestrator
pub trait WithContext<T> {
    /// Record the placement cursor on seam invariant errors
    ///
    /// # Errors
    ///
    /// Propagates the original error, with the cursor set when it is a
    /// [`QuiltError::SeamInvariant`]
    fn at_cursor(self, cursor: [usize; 2]) -> Result<T>;
}

impl<T> WithContext<T> for Result<T> {
    fn at_cursor(self, at: [usize; 2]) -> Result<T> {
        self.map_err(|mut error| {
            if let QuiltError::SeamInvariant { cursor, .. } = &mut error {
                *cursor = Some(at);
            }
            error
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> QuiltError {
    QuiltError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> QuiltError {
    QuiltError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a seam invariant error without a cursor; callers attach it via [`WithContext`]
pub fn seam_invariant(reason: &impl ToString) -> QuiltError {
    QuiltError::SeamInvariant {
        cursor: None,
        reason: reason.to_string(),
    }
}
