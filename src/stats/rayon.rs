//! Row-parallel statistics strategies (feature-gated).
//!
//! Per-line partials are computed by rayon workers and collected in
//! line order; the reductions below then walk them sequentially in
//! ascending line index, so results are identical to the sequential
//! strategies bit for bit, regardless of thread count.
//!
//! The two-pass strategy stays sequential on purpose: it is the
//! reference baseline the other strategies are validated against.

use rayon::prelude::*;

use crate::grid::{Region, SampleGrid};
use crate::stats::{
    check_inputs, conquer_min_max_sum, line_forward, line_min_max_sum, line_squared_error,
    region_row, ForwardPartial, LinePartial, StatsSummary,
};
use crate::trace::trace_span;
use crate::util::GridScanResult;

/// Row-parallel divide-and-conquer sweep.
pub fn divide_conquer_par(grid: &SampleGrid, region: Region) -> GridScanResult<StatsSummary> {
    let (samples, lines) = check_inputs(grid, &region)?;
    let _span = trace_span!(
        "stats_divide_conquer",
        samples = samples,
        lines = lines,
        parallel = true
    )
    .entered();

    let partials: Vec<LinePartial> = (region.line_first..=region.line_last)
        .into_par_iter()
        .map(|line| line_min_max_sum(region_row(grid, &region, line)))
        .collect();
    let (min, max, sum) = conquer_min_max_sum(&partials);
    let inv_samples = 1.0f32 / samples as f32;
    let inv_lines = 1.0f32 / lines as f32;
    let mean = sum * inv_lines * inv_samples;

    let sq_partials: Vec<f32> = (region.line_first..=region.line_last)
        .into_par_iter()
        .map(|line| line_squared_error(region_row(grid, &region, line), mean))
        .collect();
    let mut sum_sq = 0.0f32;
    for partial in &sq_partials {
        sum_sq += partial;
    }
    let count = (samples * lines) as f32;
    let variance = sum_sq / (count - 1.0);

    Ok(StatsSummary {
        min,
        max,
        mean,
        std_dev: variance.sqrt(),
    })
}

/// Row-parallel forward single-pass sweep.
pub fn forward_par(grid: &SampleGrid, region: Region) -> GridScanResult<StatsSummary> {
    let (samples, lines) = check_inputs(grid, &region)?;
    let _span = trace_span!(
        "stats_forward",
        samples = samples,
        lines = lines,
        parallel = true
    )
    .entered();

    let partials: Vec<ForwardPartial> = (region.line_first..=region.line_last)
        .into_par_iter()
        .map(|line| line_forward(region_row(grid, &region, line)))
        .collect();

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f32;
    let mut sum_sq = 0.0f32;
    for partial in &partials {
        if partial.min < min {
            min = partial.min;
        }
        if partial.max > max {
            max = partial.max;
        }
        sum += partial.sum;
        sum_sq += partial.sum_sq;
    }

    let count = (samples * lines) as f32;
    let mean = sum / count;
    let variance = (sum_sq - mean * sum) / (count - 1.0);

    Ok(StatsSummary {
        min,
        max,
        mean,
        std_dev: variance.sqrt(),
    })
}
