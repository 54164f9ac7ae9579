//! Summed absolute differences between a reference grid and a mask.

use crate::grid::SampleGrid;
use crate::search::{check_mask, scan_scores, BestScore, MatchOutcome};
use crate::trace::{trace_event, trace_span};
use crate::util::GridScanResult;

/// Computes the absolute-difference score for every valid placement.
///
/// Lower scores mark better matches; an exact sub-window of the
/// reference scores 0 at its own offset. Returns the score grid of
/// `(W - w + 1) × (H - h + 1)` sums and the outcome of the
/// best-placement scan (minimum sum wins).
pub fn absolute_difference(
    reference: &SampleGrid,
    mask: &SampleGrid,
) -> GridScanResult<(SampleGrid, MatchOutcome)> {
    let (out_samples, out_lines) = check_mask(reference, mask)?;
    let _span = trace_span!(
        "absolute_difference",
        samples = reference.samples(),
        lines = reference.lines(),
        mask_samples = mask.samples(),
        mask_lines = mask.lines()
    )
    .entered();

    let mut scores = SampleGrid::new(out_samples, out_lines, 1)?;
    for y in 0..out_lines {
        difference_row(reference, mask, y, scores.row_mut(y));
    }

    let outcome = scan_scores(&scores, BestScore::Minimum);
    trace_event!(
        "absolute_difference_done",
        best_x = outcome.best_x,
        best_y = outcome.best_y,
        min_score = outcome.min_score
    );
    Ok((scores, outcome))
}

/// Fills one line of the score grid.
pub(crate) fn difference_row(
    reference: &SampleGrid,
    mask: &SampleGrid,
    y: usize,
    out_row: &mut [f32],
) {
    let mask_samples = mask.samples();
    let mask_lines = mask.lines();

    for (x, out) in out_row.iter_mut().enumerate() {
        let mut difference = 0.0f32;
        for my in 0..mask_lines {
            let ref_row = &reference.row(y + my)[x..x + mask_samples];
            let mask_row = mask.row(my);
            for (&ref_sample, &mask_sample) in ref_row.iter().zip(mask_row) {
                difference += (ref_sample - mask_sample).abs();
            }
        }
        *out = difference;
    }
}
