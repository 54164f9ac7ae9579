use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gridscan::search::{absolute_difference, correlate};
use gridscan::{GridScanError, SampleGrid};

fn make_reference(samples: usize, lines: usize, seed: u64) -> SampleGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = SampleGrid::new(samples, lines, 1).unwrap();
    for y in 0..lines {
        for x in 0..samples {
            grid.set(y, x, rng.random::<f32>());
        }
    }
    grid
}

fn extract_mask(
    reference: &SampleGrid,
    x0: usize,
    y0: usize,
    samples: usize,
    lines: usize,
) -> SampleGrid {
    let mut mask = SampleGrid::new(samples, lines, 1).unwrap();
    for y in 0..lines {
        for x in 0..samples {
            mask.set(y, x, reference.get(y0 + y, x0 + x));
        }
    }
    mask
}

#[test]
fn score_grid_covers_every_placement() {
    let reference = make_reference(64, 48, 11);
    let mask = extract_mask(&reference, 0, 0, 16, 12);

    let (scores, _) = absolute_difference(&reference, &mask).unwrap();
    assert_eq!(scores.samples(), 64 - 16 + 1);
    assert_eq!(scores.lines(), 48 - 12 + 1);

    let (scores, _) = correlate(&reference, &mask).unwrap();
    assert_eq!(scores.samples(), 64 - 16 + 1);
    assert_eq!(scores.lines(), 48 - 12 + 1);
}

#[test]
fn exact_sub_window_scores_zero_difference() {
    let reference = make_reference(64, 48, 23);
    let mask = extract_mask(&reference, 20, 10, 16, 12);

    let (scores, outcome) = absolute_difference(&reference, &mask).unwrap();
    assert_eq!(scores.get(10, 20), 0.0);
    assert_eq!(outcome.best_x, 20);
    assert_eq!(outcome.best_y, 10);
    assert_eq!(outcome.min_score, 0.0);
    assert!(outcome.max_score > 0.0);
}

#[test]
fn exact_sub_window_maximizes_correlation() {
    let reference = make_reference(64, 48, 42);
    let mask = extract_mask(&reference, 20, 10, 16, 12);

    let (scores, outcome) = correlate(&reference, &mask).unwrap();
    assert_eq!(outcome.best_x, 20);
    assert_eq!(outcome.best_y, 10);
    assert!(scores.get(10, 20) > 0.999);
    assert!(outcome.max_score <= 1.0 + 1e-3);
}

#[test]
fn ties_resolve_to_first_row_major_placement() {
    // Two identical copies of the mask pattern; the leftmost placement
    // in the topmost line must win.
    let mut reference = SampleGrid::new(8, 6, 1).unwrap();
    let pattern = [[0.25f32, 0.5], [0.75, 1.0]];
    for (dy, row) in pattern.iter().enumerate() {
        for (dx, &value) in row.iter().enumerate() {
            reference.set(1 + dy, 1 + dx, value);
            reference.set(1 + dy, 5 + dx, value);
        }
    }
    let mut mask = SampleGrid::new(2, 2, 1).unwrap();
    for (dy, row) in pattern.iter().enumerate() {
        mask.row_mut(dy).copy_from_slice(row);
    }

    let (scores, outcome) = absolute_difference(&reference, &mask).unwrap();
    assert_eq!(scores.get(1, 1), 0.0);
    assert_eq!(scores.get(1, 5), 0.0);
    assert_eq!(outcome.best_x, 1);
    assert_eq!(outcome.best_y, 1);
}

#[test]
fn oversized_mask_is_rejected() {
    let reference = make_reference(16, 16, 3);
    let mask = make_reference(17, 8, 4);
    let err = correlate(&reference, &mask).err().unwrap();
    assert_eq!(
        err,
        GridScanError::MaskTooLarge {
            mask_samples: 17,
            mask_lines: 8,
            samples: 16,
            lines: 16,
        }
    );
}

#[test]
fn flat_reference_surfaces_non_finite_scores() {
    let mut reference = SampleGrid::new(8, 8, 1).unwrap();
    for y in 0..8 {
        reference.row_mut(y).fill(0.5);
    }
    let mask = make_reference(3, 3, 9);

    let (scores, outcome) = correlate(&reference, &mask).unwrap();
    assert!(scores.as_slice().iter().all(|v| !v.is_finite()));
    assert_eq!(outcome.min_score, f32::INFINITY);
    assert_eq!(outcome.max_score, f32::NEG_INFINITY);
    assert_eq!((outcome.best_x, outcome.best_y), (0, 0));
}
