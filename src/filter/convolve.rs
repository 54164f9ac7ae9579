//! Generic 2-D convolution with renormalizing boundary handling.

use crate::grid::SampleGrid;
use crate::trace::trace_span;
use crate::util::{GridScanError, GridScanResult};

/// Validated convolution weight matrix.
///
/// Both dimensions must be odd so a unique center tap exists.
pub struct Kernel {
    grid: SampleGrid,
    half_samples: usize,
    half_lines: usize,
}

impl Kernel {
    /// Wraps a weight grid, rejecting even dimensions.
    pub fn from_grid(grid: SampleGrid) -> GridScanResult<Self> {
        grid.ensure_single_band()?;
        if grid.samples() % 2 == 0 || grid.lines() % 2 == 0 {
            return Err(GridScanError::InvalidKernel {
                samples: grid.samples(),
                lines: grid.lines(),
            });
        }
        let half_samples = grid.samples() / 2;
        let half_lines = grid.lines() / 2;
        Ok(Self {
            grid,
            half_samples,
            half_lines,
        })
    }

    /// Unit impulse: all weight on the center tap. Convolving with it is
    /// the identity transform.
    pub fn dirac(size: usize) -> GridScanResult<Self> {
        let mut grid = SampleGrid::new(size, size, 1)?;
        grid.set(size / 2, size / 2, 1.0);
        Self::from_grid(grid)
    }

    /// Box blur: uniform weights over a square footprint.
    pub fn box_blur(size: usize) -> GridScanResult<Self> {
        let mut grid = SampleGrid::new(size, size, 1)?;
        for line in 0..size {
            grid.row_mut(line).fill(1.0);
        }
        Self::from_grid(grid)
    }

    /// 3x3 laplacian high-pass kernel.
    ///
    /// Its weights sum to zero, so renormalized output is degenerate by
    /// construction; see [`convolve`].
    pub fn laplacian() -> GridScanResult<Self> {
        let mut grid = SampleGrid::new(3, 3, 1)?;
        grid.row_mut(0).copy_from_slice(&[0.0, 1.0, 0.0]);
        grid.row_mut(1).copy_from_slice(&[1.0, -4.0, 1.0]);
        grid.row_mut(2).copy_from_slice(&[0.0, 1.0, 0.0]);
        Self::from_grid(grid)
    }

    /// 5x5 laplacian-of-gaussian high-pass kernel.
    pub fn laplacian_of_gaussian() -> GridScanResult<Self> {
        let weights: [[f32; 5]; 5] = [
            [0.0, -1.0, -2.0, -1.0, 0.0],
            [-1.0, 0.0, 2.0, 0.0, -1.0],
            [-2.0, 2.0, 8.0, 2.0, -2.0],
            [-1.0, 0.0, 2.0, 0.0, -1.0],
            [0.0, -1.0, -2.0, -1.0, 0.0],
        ];
        let mut grid = SampleGrid::new(5, 5, 1)?;
        for (line, row) in weights.iter().enumerate() {
            grid.row_mut(line).copy_from_slice(row);
        }
        Self::from_grid(grid)
    }

    /// Returns the underlying weight grid.
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }
}

/// Convolves a grid with a kernel, producing a grid of the same size.
///
/// Each output sample sums `K[my][mx] · G[y+my-kh/2][x+mx-kw/2]` over
/// the taps whose source sample lies inside the grid, together with the
/// sum of the kernel weights actually used, then divides by that
/// effective weight sum. Edge and corner outputs therefore use a
/// smaller effective kernel instead of treating out-of-bounds samples
/// as zero, which would darken the borders.
///
/// A kernel whose in-bounds weights sum to zero (a clipped high-pass
/// kernel, or [`Kernel::laplacian`] anywhere) makes the divisor zero;
/// the affected samples surface as non-finite values, not as errors.
pub fn convolve(grid: &SampleGrid, kernel: &Kernel) -> GridScanResult<SampleGrid> {
    grid.ensure_single_band()?;
    let _span = trace_span!(
        "convolve",
        samples = grid.samples(),
        lines = grid.lines(),
        kernel_samples = kernel.grid.samples(),
        kernel_lines = kernel.grid.lines()
    )
    .entered();

    let mut target = SampleGrid::new(grid.samples(), grid.lines(), 1)?;
    for y in 0..grid.lines() {
        convolve_row(grid, kernel, y, target.row_mut(y));
    }
    Ok(target)
}

/// Fills one output line.
pub(crate) fn convolve_row(grid: &SampleGrid, kernel: &Kernel, y: usize, out_row: &mut [f32]) {
    let samples = grid.samples() as isize;
    let lines = grid.lines() as isize;
    let kernel_samples = kernel.grid.samples();
    let kernel_lines = kernel.grid.lines();
    let half_samples = kernel.half_samples as isize;
    let half_lines = kernel.half_lines as isize;

    for (x, out) in out_row.iter_mut().enumerate() {
        let mut weighted = 0.0f32;
        let mut weight_sum = 0.0f32;

        for my in 0..kernel_lines {
            let src_y = y as isize + my as isize - half_lines;
            if src_y < 0 || src_y >= lines {
                continue;
            }
            let src_row = grid.row(src_y as usize);
            let kernel_row = kernel.grid.row(my);

            for (mx, &weight) in kernel_row.iter().enumerate() {
                let src_x = x as isize + mx as isize - half_samples;
                if src_x < 0 || src_x >= samples {
                    continue;
                }
                weighted += weight * src_row[src_x as usize];
                weight_sum += weight;
            }
        }

        // A zero effective weight sum surfaces as a non-finite sample.
        *out = weighted / weight_sum;
    }
}
