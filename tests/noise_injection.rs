use rand::rngs::StdRng;
use rand::SeedableRng;

use gridscan::noise::{additive_gaussian, salt_and_pepper, SaltPepperParams};
use gridscan::{GridScanError, SampleGrid};

fn half_gray(samples: usize, lines: usize) -> SampleGrid {
    let mut grid = SampleGrid::new(samples, lines, 1).unwrap();
    for y in 0..lines {
        grid.row_mut(y).fill(0.5);
    }
    grid
}

#[test]
fn gaussian_noise_is_reproducible_with_a_seed() {
    let mut first = half_gray(16, 12);
    let mut second = first.clone();

    let mut rng = StdRng::seed_from_u64(99);
    additive_gaussian(&mut first, &mut rng, 0.5, 0.125).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    additive_gaussian(&mut second, &mut rng, 0.5, 0.125).unwrap();

    assert_eq!(first, second);
}

#[test]
fn gaussian_noise_perturbs_samples() {
    let mut grid = half_gray(16, 12);
    let clean = grid.clone();
    let mut rng = StdRng::seed_from_u64(7);
    additive_gaussian(&mut grid, &mut rng, 1.0, 0.25).unwrap();
    assert_ne!(grid, clean);
}

#[test]
fn zero_deviation_leaves_the_grid_untouched() {
    let mut grid = half_gray(8, 8);
    let clean = grid.clone();
    let mut rng = StdRng::seed_from_u64(1);
    additive_gaussian(&mut grid, &mut rng, 2.0, 0.0).unwrap();
    assert_eq!(grid, clean);
}

#[test]
fn negative_deviation_is_rejected() {
    let mut grid = half_gray(4, 4);
    let mut rng = StdRng::seed_from_u64(1);
    let err = additive_gaussian(&mut grid, &mut rng, 1.0, -0.5).err().unwrap();
    assert_eq!(
        err,
        GridScanError::InvalidParameter {
            reason: "noise standard deviation must be finite and non-negative",
        }
    );
}

#[test]
fn salt_and_pepper_rejects_excess_probability() {
    let mut grid = half_gray(4, 4);
    let mut rng = StdRng::seed_from_u64(1);
    let params = SaltPepperParams {
        pepper_probability: 0.6,
        salt_probability: 0.5,
        pepper_value: 0.0,
        salt_value: 1.0,
    };
    let err = salt_and_pepper(&mut grid, &mut rng, &params).err().unwrap();
    assert_eq!(
        err,
        GridScanError::InvalidParameter {
            reason: "salt and pepper probabilities must lie in [0, 1] and sum to at most 1",
        }
    );
}

#[test]
fn certain_pepper_floods_the_grid() {
    let mut grid = half_gray(8, 6);
    let mut rng = StdRng::seed_from_u64(5);
    let params = SaltPepperParams {
        pepper_probability: 1.0,
        salt_probability: 0.0,
        pepper_value: 0.125,
        salt_value: 1.0,
    };
    salt_and_pepper(&mut grid, &mut rng, &params).unwrap();
    assert!(grid.as_slice().iter().all(|&v| v == 0.125));
}

#[test]
fn certain_salt_floods_the_grid() {
    let mut grid = half_gray(8, 6);
    let mut rng = StdRng::seed_from_u64(5);
    let params = SaltPepperParams {
        pepper_probability: 0.0,
        salt_probability: 1.0,
        pepper_value: 0.0,
        salt_value: 0.875,
    };
    salt_and_pepper(&mut grid, &mut rng, &params).unwrap();
    assert!(grid.as_slice().iter().all(|&v| v == 0.875));
}

#[test]
fn zero_probabilities_leave_the_grid_untouched() {
    let mut grid = half_gray(8, 6);
    let clean = grid.clone();
    let mut rng = StdRng::seed_from_u64(5);
    let params = SaltPepperParams {
        pepper_probability: 0.0,
        salt_probability: 0.0,
        pepper_value: 0.0,
        salt_value: 1.0,
    };
    salt_and_pepper(&mut grid, &mut rng, &params).unwrap();
    assert_eq!(grid, clean);
}

#[test]
fn impulse_counts_follow_the_probabilities() {
    let mut grid = half_gray(64, 64);
    let mut rng = StdRng::seed_from_u64(123);
    let params = SaltPepperParams {
        pepper_probability: 0.05,
        salt_probability: 0.05,
        pepper_value: 0.0,
        salt_value: 1.0,
    };
    salt_and_pepper(&mut grid, &mut rng, &params).unwrap();

    let total = grid.as_slice().len() as f32;
    let pepper = grid.as_slice().iter().filter(|&&v| v == 0.0).count() as f32;
    let salt = grid.as_slice().iter().filter(|&&v| v == 1.0).count() as f32;
    // 4096 draws at 5%: expect ~205 each, allow a generous band.
    assert!(pepper / total > 0.02 && pepper / total < 0.08);
    assert!(salt / total > 0.02 && salt / total < 0.08);
}
