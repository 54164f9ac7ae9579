//! Descriptive statistics over grid regions.
//!
//! Three strategies compute the same summary: a naive two-pass sweep, a
//! divide-and-conquer pass over per-line partials, and a forward
//! single-pass sum/sum-of-squares variant. They agree exactly on
//! `min`/`max` and within floating-point rounding on `mean`/`std_dev`;
//! the standard deviation is the sample standard deviation (`n - 1`).
//!
//! The forward strategy trades a full second sweep for reduced memory
//! traffic but is more exposed to cancellation when sample magnitudes
//! are large; prefer [`two_pass`] or [`divide_conquer`] when precision
//! matters more than throughput.

use crate::grid::{Region, SampleGrid};
use crate::trace::trace_span;
use crate::util::{GridScanError, GridScanResult};

#[cfg(feature = "rayon")]
pub mod rayon;

/// Immutable summary of a region's sample distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsSummary {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub std_dev: f32,
}

/// Algorithmic strategy used to compute a [`StatsSummary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Two sequential sweeps: min/max/mean, then squared deviations.
    TwoPass,
    /// Independent per-line partials reduced in ascending line order.
    DivideConquer,
    /// Single sweep accumulating sum and sum of squares per line.
    Forward,
}

/// Computes a summary with the given strategy.
pub fn compute(
    grid: &SampleGrid,
    region: Region,
    strategy: Strategy,
) -> GridScanResult<StatsSummary> {
    match strategy {
        Strategy::TwoPass => two_pass(grid, region),
        Strategy::DivideConquer => divide_conquer(grid, region),
        Strategy::Forward => forward(grid, region),
    }
}

/// Per-line partial result of the min/max/sum sweep.
#[derive(Clone, Copy)]
pub(crate) struct LinePartial {
    pub(crate) sum: f32,
    pub(crate) min: f32,
    pub(crate) max: f32,
}

/// Per-line partial result of the forward sum/sum-of-squares sweep.
#[derive(Clone, Copy)]
pub(crate) struct ForwardPartial {
    pub(crate) sum: f32,
    pub(crate) sum_sq: f32,
    pub(crate) min: f32,
    pub(crate) max: f32,
}

pub(crate) fn check_inputs(
    grid: &SampleGrid,
    region: &Region,
) -> GridScanResult<(usize, usize)> {
    grid.ensure_single_band()?;
    grid.check_region(region)?;
    let samples = region.samples();
    let lines = region.lines();
    if samples * lines < 2 {
        return Err(GridScanError::DegenerateRegion { samples, lines });
    }
    Ok((samples, lines))
}

#[inline]
pub(crate) fn region_row<'a>(grid: &'a SampleGrid, region: &Region, line: usize) -> &'a [f32] {
    &grid.row(line)[region.sample_first..=region.sample_last]
}

pub(crate) fn line_min_max_sum(row: &[f32]) -> LinePartial {
    let mut partial = LinePartial {
        sum: 0.0,
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };
    for &sample in row {
        partial.sum += sample;
        if sample < partial.min {
            partial.min = sample;
        }
        if sample > partial.max {
            partial.max = sample;
        }
    }
    partial
}

pub(crate) fn line_squared_error(row: &[f32], mean: f32) -> f32 {
    let mut sum_sq = 0.0f32;
    for &sample in row {
        let diff = sample - mean;
        sum_sq += diff * diff;
    }
    sum_sq
}

pub(crate) fn line_forward(row: &[f32]) -> ForwardPartial {
    let mut partial = ForwardPartial {
        sum: 0.0,
        sum_sq: 0.0,
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };
    for &sample in row {
        partial.sum += sample;
        partial.sum_sq += sample * sample;
        if sample < partial.min {
            partial.min = sample;
        }
        if sample > partial.max {
            partial.max = sample;
        }
    }
    partial
}

/// Reduces first-pass partials in ascending line order.
pub(crate) fn conquer_min_max_sum(partials: &[LinePartial]) -> (f32, f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f32;
    for partial in partials {
        if partial.min < min {
            min = partial.min;
        }
        if partial.max > max {
            max = partial.max;
        }
        sum += partial.sum;
    }
    (min, max, sum)
}

/// Naive two-pass sweep.
///
/// The first pass gathers min/max and per-line sums, scaling each line
/// sum by `1/samples` and the aggregate by `1/lines` so no single
/// accumulator grows with the full region. The second pass accumulates
/// squared deviations from the mean, normalized by `n - 1`.
pub fn two_pass(grid: &SampleGrid, region: Region) -> GridScanResult<StatsSummary> {
    let (samples, lines) = check_inputs(grid, &region)?;
    let _span = trace_span!("stats_two_pass", samples = samples, lines = lines).entered();

    let inv_samples = 1.0f32 / samples as f32;
    let inv_lines = 1.0f32 / lines as f32;

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut mean = 0.0f32;
    for line in region.line_first..=region.line_last {
        let row = region_row(grid, &region, line);
        let mut line_sum = 0.0f32;
        for &sample in row {
            line_sum += sample;
            if sample < min {
                min = sample;
            }
            if sample > max {
                max = sample;
            }
        }
        mean += line_sum * inv_samples;
    }
    mean *= inv_lines;

    let mut sum_sq = 0.0f32;
    for line in region.line_first..=region.line_last {
        sum_sq += line_squared_error(region_row(grid, &region, line), mean);
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

/// Divide-and-conquer sweep over per-line partials.
///
/// Line partials carry no shared mutable state, so the per-line phase
/// parallelizes cleanly (`rayon::divide_conquer_par` behind the `rayon`
/// feature); the reduction always walks partials in ascending line
/// order to keep rounding deterministic across thread counts.
pub fn divide_conquer(grid: &SampleGrid, region: Region) -> GridScanResult<StatsSummary> {
    let (samples, lines) = check_inputs(grid, &region)?;
    let _span = trace_span!("stats_divide_conquer", samples = samples, lines = lines).entered();

    let partials: Vec<LinePartial> = (region.line_first..=region.line_last)
        .map(|line| line_min_max_sum(region_row(grid, &region, line)))
        .collect();
    let (min, max, sum) = conquer_min_max_sum(&partials);
    let inv_samples = 1.0f32 / samples as f32;
    let inv_lines = 1.0f32 / lines as f32;
    let mean = sum * inv_lines * inv_samples;

    let mut sum_sq = 0.0f32;
    for line in region.line_first..=region.line_last {
        sum_sq += line_squared_error(region_row(grid, &region, line), mean);
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

/// Forward single-pass sweep.
///
/// Accumulates per-line `Σx` and `Σx²` in one sweep and derives
/// `mean = Σx / n` and `variance = (Σx² - mean·Σx) / (n - 1)`
/// analytically. One pass less over the samples, but the subtraction of
/// two large accumulators cancels precision for large magnitudes.
pub fn forward(grid: &SampleGrid, region: Region) -> GridScanResult<StatsSummary> {
    let (samples, lines) = check_inputs(grid, &region)?;
    let _span = trace_span!("stats_forward", samples = samples, lines = lines).entered();

    let partials: Vec<ForwardPartial> = (region.line_first..=region.line_last)
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
