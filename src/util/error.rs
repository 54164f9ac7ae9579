//! Error types for gridscan.

use thiserror::Error;

/// Result alias for gridscan operations.
pub type GridScanResult<T> = std::result::Result<T, GridScanError>;

/// Errors that can occur when running gridscan operations.
///
/// Every variant is a precondition violation detected at the entry of an
/// operation, before any samples are touched. Numerical degeneracies
/// (zero-variance correlation windows, zero effective kernel weight) are
/// not errors; they propagate as non-finite samples in the output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridScanError {
    /// Grid or intermediate buffer storage could not be obtained.
    #[error("failed to allocate storage for a {samples}x{lines} grid")]
    Allocation { samples: usize, lines: usize },
    /// A grid dimension is zero.
    #[error("invalid grid dimensions {samples}x{lines}")]
    InvalidDimensions { samples: usize, lines: usize },
    /// An inclusive region bound is reversed or exceeds the grid extent.
    #[error("invalid {axis} range {first}..={last} for extent {extent}")]
    InvalidRange {
        axis: &'static str,
        first: usize,
        last: usize,
        extent: usize,
    },
    /// The mask does not fit inside the reference grid.
    #[error("mask of {mask_samples}x{mask_lines} exceeds reference of {samples}x{lines}")]
    MaskTooLarge {
        mask_samples: usize,
        mask_lines: usize,
        samples: usize,
        lines: usize,
    },
    /// Kernel or window dimensions must be odd so a unique center exists.
    #[error("kernel dimensions {samples}x{lines} must be odd")]
    InvalidKernel { samples: usize, lines: usize },
    /// A scalar parameter is outside its documented domain.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: &'static str },
    /// The region holds too few samples for a sample variance.
    #[error("region of {samples}x{lines} samples is too small for a sample variance")]
    DegenerateRegion { samples: usize, lines: usize },
    /// The operation supports single-band grids only.
    #[error("unsupported band count {bands}")]
    UnsupportedBandCount { bands: usize },
    /// A raw sample buffer does not match the declared dimensions.
    #[error("sample buffer holds {got} values, {needed} needed")]
    BufferSizeMismatch { needed: usize, got: usize },
}
