//! Owned sample grids and rectangular regions.
//!
//! `SampleGrid` owns a flat row-major `f32` buffer of `samples × lines`
//! values (`index = line * samples + sample`), avoiding per-line
//! allocations and keeping row traversal cache-friendly. Rows are exposed
//! as borrowed slices into that buffer, never as independently owned
//! objects.

use crate::util::{GridScanError, GridScanResult};

pub mod display;

pub use display::{to_display_u8, DisplayRange};

/// Scale factor applied when normalizing 8-bit samples to `[0, 1]`.
const INVERSE_255: f32 = 1.0 / 255.0;

/// Owned 2-D container of `f32` samples.
///
/// `bands` is carried as metadata; storage always covers one band and
/// operations that require a single band reject other counts eagerly.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    samples: usize,
    lines: usize,
    bands: usize,
    data: Vec<f32>,
}

impl SampleGrid {
    /// Creates a zero-filled grid of `samples × lines` values.
    ///
    /// Storage is obtained fallibly; a grid that cannot be allocated
    /// reports [`GridScanError::Allocation`] instead of aborting.
    pub fn new(samples: usize, lines: usize, bands: usize) -> GridScanResult<Self> {
        if samples == 0 || lines == 0 {
            return Err(GridScanError::InvalidDimensions { samples, lines });
        }
        if bands == 0 {
            return Err(GridScanError::UnsupportedBandCount { bands });
        }
        let len = samples
            .checked_mul(lines)
            .ok_or(GridScanError::Allocation { samples, lines })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| GridScanError::Allocation { samples, lines })?;
        data.resize(len, 0.0);
        Ok(Self {
            samples,
            lines,
            bands,
            data,
        })
    }

    /// Creates a single-band grid from raw 8-bit samples scaled to `[0, 1]`.
    ///
    /// This is the in-memory half of the loader boundary: an external
    /// decoder produces the byte buffer, this normalizes it by `1/255`.
    pub fn from_u8_samples(bytes: &[u8], samples: usize, lines: usize) -> GridScanResult<Self> {
        let mut grid = Self::new(samples, lines, 1)?;
        let needed = grid.data.len();
        if bytes.len() != needed {
            return Err(GridScanError::BufferSizeMismatch {
                needed,
                got: bytes.len(),
            });
        }
        for (dst, &src) in grid.data.iter_mut().zip(bytes) {
            *dst = f32::from(src) * INVERSE_255;
        }
        Ok(grid)
    }

    /// Returns the number of samples per line (columns).
    #[inline]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the number of lines (rows).
    #[inline]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Returns the band count carried as metadata.
    #[inline]
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Returns the backing slice in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the mutable backing slice in row-major order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns the sample at `(line, sample)`.
    ///
    /// Panics when either index is out of bounds.
    #[inline]
    pub fn get(&self, line: usize, sample: usize) -> f32 {
        assert!(line < self.lines && sample < self.samples);
        self.data[line * self.samples + sample]
    }

    /// Sets the sample at `(line, sample)`.
    ///
    /// Panics when either index is out of bounds.
    #[inline]
    pub fn set(&mut self, line: usize, sample: usize, value: f32) {
        assert!(line < self.lines && sample < self.samples);
        self.data[line * self.samples + sample] = value;
    }

    /// Returns line `line` as a borrowed slice of `samples` values.
    ///
    /// Panics when `line` is out of bounds.
    #[inline]
    pub fn row(&self, line: usize) -> &[f32] {
        let start = line * self.samples;
        &self.data[start..start + self.samples]
    }

    /// Returns line `line` as a mutable slice of `samples` values.
    ///
    /// Panics when `line` is out of bounds.
    #[inline]
    pub fn row_mut(&mut self, line: usize) -> &mut [f32] {
        let start = line * self.samples;
        &mut self.data[start..start + self.samples]
    }

    /// Swaps line `i` with line `lines - 1 - i` in place.
    ///
    /// Used by orientation-normalizing loaders whose sources store lines
    /// bottom-up.
    pub fn flip_vertically(&mut self) {
        let samples = self.samples;
        for line in 0..self.lines / 2 {
            let top = line * samples;
            let bottom = (self.lines - 1 - line) * samples;
            let (head, tail) = self.data.split_at_mut(bottom);
            head[top..top + samples].swap_with_slice(&mut tail[..samples]);
        }
    }

    pub(crate) fn ensure_single_band(&self) -> GridScanResult<()> {
        if self.bands != 1 {
            return Err(GridScanError::UnsupportedBandCount { bands: self.bands });
        }
        Ok(())
    }

    /// Validates an inclusive region against this grid's extents.
    pub fn check_region(&self, region: &Region) -> GridScanResult<()> {
        if region.sample_last < region.sample_first || region.sample_last >= self.samples {
            return Err(GridScanError::InvalidRange {
                axis: "sample",
                first: region.sample_first,
                last: region.sample_last,
                extent: self.samples,
            });
        }
        if region.line_last < region.line_first || region.line_last >= self.lines {
            return Err(GridScanError::InvalidRange {
                axis: "line",
                first: region.line_first,
                last: region.line_last,
                extent: self.lines,
            });
        }
        Ok(())
    }
}

/// Inclusive rectangular bounds inside a grid.
///
/// Both axes are inclusive on both ends; `last >= first` is required and
/// validated by the consuming operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub sample_first: usize,
    pub sample_last: usize,
    pub line_first: usize,
    pub line_last: usize,
}

impl Region {
    /// Returns the region covering the whole grid.
    pub fn full(grid: &SampleGrid) -> Self {
        Self {
            sample_first: 0,
            sample_last: grid.samples() - 1,
            line_first: 0,
            line_last: grid.lines() - 1,
        }
    }

    /// Returns the number of samples per line in the region.
    #[inline]
    pub fn samples(&self) -> usize {
        self.sample_last - self.sample_first + 1
    }

    /// Returns the number of lines in the region.
    #[inline]
    pub fn lines(&self) -> usize {
        self.line_last - self.line_first + 1
    }
}
