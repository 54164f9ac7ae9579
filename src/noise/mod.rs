//! In-place noise injection with caller-supplied generators.
//!
//! The pseudorandom generator is an explicit argument threaded through
//! every call, never a global; seeding it makes runs reproducible and
//! tests deterministic.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::grid::SampleGrid;
use crate::trace::trace_span;
use crate::util::{GridScanError, GridScanResult};

/// Parameters for salt-and-pepper impulsive noise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaltPepperParams {
    /// Probability of forcing a sample to `pepper_value`.
    pub pepper_probability: f32,
    /// Probability of forcing a sample to `salt_value`.
    pub salt_probability: f32,
    /// Low impulse value.
    pub pepper_value: f32,
    /// High impulse value.
    pub salt_value: f32,
}

/// Adds white gaussian noise to every sample in place.
///
/// Each sample receives `gain · N(0, std_dev)`. A negative or
/// non-finite `std_dev` or a non-finite `gain` is rejected before any
/// sample changes.
pub fn additive_gaussian(
    grid: &mut SampleGrid,
    rng: &mut impl Rng,
    gain: f32,
    std_dev: f32,
) -> GridScanResult<()> {
    grid.ensure_single_band()?;
    if !gain.is_finite() {
        return Err(GridScanError::InvalidParameter {
            reason: "noise gain must be finite",
        });
    }
    let normal = Normal::new(0.0f32, std_dev).map_err(|_| GridScanError::InvalidParameter {
        reason: "noise standard deviation must be finite and non-negative",
    })?;
    let _span = trace_span!(
        "additive_gaussian",
        samples = grid.samples(),
        lines = grid.lines()
    )
    .entered();

    for line in 0..grid.lines() {
        for sample in grid.row_mut(line) {
            *sample += gain * normal.sample(rng);
        }
    }
    Ok(())
}

/// Applies salt-and-pepper impulsive noise in place.
///
/// For every sample a uniform draw `u ∈ [0, 1)` decides its fate:
/// `u < pepper_probability` forces the pepper value,
/// `u >= 1 - salt_probability` forces the salt value, anything between
/// leaves the sample untouched. The probabilities must each lie in
/// `[0, 1]` and sum to at most 1.
pub fn salt_and_pepper(
    grid: &mut SampleGrid,
    rng: &mut impl Rng,
    params: &SaltPepperParams,
) -> GridScanResult<()> {
    grid.ensure_single_band()?;
    let pepper = params.pepper_probability;
    let salt = params.salt_probability;
    if !(0.0..=1.0).contains(&pepper) || !(0.0..=1.0).contains(&salt) || pepper + salt > 1.0 {
        return Err(GridScanError::InvalidParameter {
            reason: "salt and pepper probabilities must lie in [0, 1] and sum to at most 1",
        });
    }
    let _span = trace_span!(
        "salt_and_pepper",
        samples = grid.samples(),
        lines = grid.lines()
    )
    .entered();

    let salt_threshold = 1.0 - salt;
    for line in 0..grid.lines() {
        for sample in grid.row_mut(line) {
            let draw: f32 = rng.random();
            if draw < pepper {
                *sample = params.pepper_value;
            } else if draw >= salt_threshold {
                *sample = params.salt_value;
            }
        }
    }
    Ok(())
}
