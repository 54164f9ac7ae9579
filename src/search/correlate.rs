//! Normalized cross-correlation between a reference grid and a mask.

use crate::grid::SampleGrid;
use crate::search::{check_mask, scan_scores, BestScore, MatchOutcome};
use crate::trace::{trace_event, trace_span};
use crate::util::GridScanResult;

/// Correlates the mask against every valid placement in the reference.
///
/// Returns the score grid of `(W - w + 1) × (H - h + 1)` correlation
/// coefficients and the outcome of the best-placement scan (maximum
/// coefficient wins). Scores are not clamped to `[-1, 1]`; a window
/// with zero variance drives the denominator to zero and surfaces as a
/// non-finite score rather than being silently replaced.
pub fn correlate(
    reference: &SampleGrid,
    mask: &SampleGrid,
) -> GridScanResult<(SampleGrid, MatchOutcome)> {
    let (out_samples, out_lines) = check_mask(reference, mask)?;
    let _span = trace_span!(
        "correlate",
        samples = reference.samples(),
        lines = reference.lines(),
        mask_samples = mask.samples(),
        mask_lines = mask.lines()
    )
    .entered();

    // The mask's own moments never change across placements.
    let (mask_mean, mask_var) = mask_moments(mask);

    let mut scores = SampleGrid::new(out_samples, out_lines, 1)?;
    for y in 0..out_lines {
        correlate_row(reference, mask, mask_mean, mask_var, y, scores.row_mut(y));
    }

    let outcome = scan_scores(&scores, BestScore::Maximum);
    trace_event!(
        "correlate_done",
        best_x = outcome.best_x,
        best_y = outcome.best_y,
        max_score = outcome.max_score
    );
    Ok((scores, outcome))
}

/// Mean and summed squared deviation of the mask samples.
pub(crate) fn mask_moments(mask: &SampleGrid) -> (f32, f32) {
    let inv_count = 1.0f32 / (mask.samples() * mask.lines()) as f32;
    let mut sum = 0.0f32;
    for my in 0..mask.lines() {
        for &sample in mask.row(my) {
            sum += sample;
        }
    }
    let mean = sum * inv_count;

    let mut var = 0.0f32;
    for my in 0..mask.lines() {
        for &sample in mask.row(my) {
            let error = sample - mean;
            var += error * error;
        }
    }
    (mean, var)
}

/// Fills one line of the score grid.
pub(crate) fn correlate_row(
    reference: &SampleGrid,
    mask: &SampleGrid,
    mask_mean: f32,
    mask_var: f32,
    y: usize,
    out_row: &mut [f32],
) {
    let mask_samples = mask.samples();
    let mask_lines = mask.lines();
    let inv_count = 1.0f32 / (mask_samples * mask_lines) as f32;

    for (x, out) in out_row.iter_mut().enumerate() {
        // Mean of the reference samples under the mask window.
        let mut window_sum = 0.0f32;
        for my in 0..mask_lines {
            let ref_row = &reference.row(y + my)[x..x + mask_samples];
            for &sample in ref_row {
                window_sum += sample;
            }
        }
        let window_mean = window_sum * inv_count;

        // Cross-covariance and the window's own variance.
        let mut cross = 0.0f32;
        let mut window_var = 0.0f32;
        for my in 0..mask_lines {
            let ref_row = &reference.row(y + my)[x..x + mask_samples];
            let mask_row = mask.row(my);
            for (&ref_sample, &mask_sample) in ref_row.iter().zip(mask_row) {
                let ref_error = ref_sample - window_mean;
                let mask_error = mask_sample - mask_mean;
                cross += ref_error * mask_error;
                window_var += ref_error * ref_error;
            }
        }

        *out = cross / (window_var * mask_var).sqrt();
    }
}
