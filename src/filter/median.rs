//! Sliding-window order-statistic (median) filtering.

use crate::grid::SampleGrid;
use crate::trace::trace_span;
use crate::util::{GridScanError, GridScanResult};

/// Applies a square median filter of odd `window` size.
///
/// Each output sample is the element at index `count / 2` of the sorted
/// in-bounds window samples; the window shrinks symmetrically at the
/// grid borders, so `count` is odd away from them. This is an order
/// statistic, not a weighted average: every output value is one of the
/// input samples.
pub fn median_filter(grid: &SampleGrid, window: usize) -> GridScanResult<SampleGrid> {
    grid.ensure_single_band()?;
    if window % 2 == 0 {
        return Err(GridScanError::InvalidKernel {
            samples: window,
            lines: window,
        });
    }
    let _span = trace_span!(
        "median_filter",
        samples = grid.samples(),
        lines = grid.lines(),
        window = window
    )
    .entered();

    let mut target = SampleGrid::new(grid.samples(), grid.lines(), 1)?;
    let mut scratch = Vec::with_capacity(window * window);
    for y in 0..grid.lines() {
        median_row(grid, window, y, &mut scratch, target.row_mut(y));
    }
    Ok(target)
}

/// Fills one output line, reusing `scratch` for window samples.
pub(crate) fn median_row(
    grid: &SampleGrid,
    window: usize,
    y: usize,
    scratch: &mut Vec<f32>,
    out_row: &mut [f32],
) {
    let samples = grid.samples() as isize;
    let lines = grid.lines() as isize;
    let half = (window / 2) as isize;

    for (x, out) in out_row.iter_mut().enumerate() {
        scratch.clear();
        for my in 0..window {
            let src_y = y as isize + my as isize - half;
            if src_y < 0 || src_y >= lines {
                continue;
            }
            let src_row = grid.row(src_y as usize);
            for mx in 0..window {
                let src_x = x as isize + mx as isize - half;
                if src_x < 0 || src_x >= samples {
                    continue;
                }
                scratch.push(src_row[src_x as usize]);
            }
        }

        // The window always covers at least the center sample.
        let mid = scratch.len() / 2;
        let (_, median, _) = scratch.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        *out = *median;
    }
}
