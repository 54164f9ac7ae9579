//! Row-parallel matching scans (feature-gated).
//!
//! Each worker owns one disjoint line of the score grid, so no
//! synchronization is needed; the best-placement scan stays a
//! sequential row-major pass and results match the sequential scans
//! exactly.

use rayon::prelude::*;

use crate::grid::SampleGrid;
use crate::search::correlate::{correlate_row, mask_moments};
use crate::search::difference::difference_row;
use crate::search::{check_mask, scan_scores, BestScore, MatchOutcome};
use crate::trace::trace_span;
use crate::util::GridScanResult;

/// Row-parallel normalized cross-correlation.
pub fn correlate_par(
    reference: &SampleGrid,
    mask: &SampleGrid,
) -> GridScanResult<(SampleGrid, MatchOutcome)> {
    let (out_samples, out_lines) = check_mask(reference, mask)?;
    let _span = trace_span!(
        "correlate",
        samples = reference.samples(),
        lines = reference.lines(),
        parallel = true
    )
    .entered();

    let (mask_mean, mask_var) = mask_moments(mask);
    let mut scores = SampleGrid::new(out_samples, out_lines, 1)?;
    scores
        .as_mut_slice()
        .par_chunks_mut(out_samples)
        .enumerate()
        .for_each(|(y, out_row)| {
            correlate_row(reference, mask, mask_mean, mask_var, y, out_row);
        });

    let outcome = scan_scores(&scores, BestScore::Maximum);
    Ok((scores, outcome))
}

/// Row-parallel summed absolute differences.
pub fn absolute_difference_par(
    reference: &SampleGrid,
    mask: &SampleGrid,
) -> GridScanResult<(SampleGrid, MatchOutcome)> {
    let (out_samples, out_lines) = check_mask(reference, mask)?;
    let _span = trace_span!(
        "absolute_difference",
        samples = reference.samples(),
        lines = reference.lines(),
        parallel = true
    )
    .entered();

    let mut scores = SampleGrid::new(out_samples, out_lines, 1)?;
    scores
        .as_mut_slice()
        .par_chunks_mut(out_samples)
        .enumerate()
        .for_each(|(y, out_row)| {
            difference_row(reference, mask, y, out_row);
        });

    let outcome = scan_scores(&scores, BestScore::Minimum);
    Ok((scores, outcome))
}
