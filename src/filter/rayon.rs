//! Row-parallel filters (feature-gated).
//!
//! Workers own disjoint output lines; the median scratch buffer is
//! per-worker state, so no synchronization is needed and results match
//! the sequential filters exactly.

use rayon::prelude::*;

use crate::filter::convolve::{convolve_row, Kernel};
use crate::filter::median::median_row;
use crate::grid::SampleGrid;
use crate::trace::trace_span;
use crate::util::{GridScanError, GridScanResult};

/// Row-parallel convolution.
pub fn convolve_par(grid: &SampleGrid, kernel: &Kernel) -> GridScanResult<SampleGrid> {
    grid.ensure_single_band()?;
    let _span = trace_span!(
        "convolve",
        samples = grid.samples(),
        lines = grid.lines(),
        parallel = true
    )
    .entered();

    let samples = grid.samples();
    let mut target = SampleGrid::new(samples, grid.lines(), 1)?;
    target
        .as_mut_slice()
        .par_chunks_mut(samples)
        .enumerate()
        .for_each(|(y, out_row)| {
            convolve_row(grid, kernel, y, out_row);
        });
    Ok(target)
}

/// Row-parallel median filter.
pub fn median_filter_par(grid: &SampleGrid, window: usize) -> GridScanResult<SampleGrid> {
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
        window = window,
        parallel = true
    )
    .entered();

    let samples = grid.samples();
    let mut target = SampleGrid::new(samples, grid.lines(), 1)?;
    target
        .as_mut_slice()
        .par_chunks_mut(samples)
        .enumerate()
        .for_each_init(
            || Vec::with_capacity(window * window),
            |scratch, (y, out_row)| {
                median_row(grid, window, y, scratch, out_row);
            },
        );
    Ok(target)
}
