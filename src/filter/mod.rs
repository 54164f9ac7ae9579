//! Spatial filters over sample grids.

pub mod convolve;
pub mod median;
#[cfg(feature = "rayon")]
pub mod rayon;

pub use convolve::{convolve, Kernel};
pub use median::median_filter;
