//! Presentation-boundary export through a linear display range.
//!
//! Converting a grid to displayable bytes is a pure function of the grid
//! and the chosen `{min, max}` range; it sits at the edge of the crate
//! and carries no analytical meaning.

use crate::grid::{Region, SampleGrid};
use crate::util::{GridScanError, GridScanResult};

/// Linear display range mapped onto `[0, 255]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRange {
    pub min: f32,
    pub max: f32,
}

/// Converts a grid sub-region to 8-bit presentation samples.
///
/// Values are mapped through `255 / (max - min)` and clamped to
/// `[0, 255]` after scaling; non-finite samples collapse to 0. The
/// output is row-major with `region.samples()` bytes per line.
pub fn to_display_u8(
    grid: &SampleGrid,
    region: Region,
    range: DisplayRange,
) -> GridScanResult<Vec<u8>> {
    grid.ensure_single_band()?;
    grid.check_region(&region)?;
    if !(range.min < range.max) {
        return Err(GridScanError::InvalidParameter {
            reason: "display range must satisfy min < max",
        });
    }

    let scaling = 255.0f32 / (range.max - range.min);
    let mut out = Vec::with_capacity(region.samples() * region.lines());
    for line in region.line_first..=region.line_last {
        let row = &grid.row(line)[region.sample_first..=region.sample_last];
        for &sample in row {
            let scaled = (sample - range.min) * scaling;
            out.push(scaled.clamp(0.0, 255.0) as u8);
        }
    }
    Ok(out)
}
