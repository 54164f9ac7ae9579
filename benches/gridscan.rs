use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use gridscan::filter::{convolve, median_filter, Kernel};
use gridscan::search::{absolute_difference, correlate};
use gridscan::stats;
use gridscan::{Region, SampleGrid};

fn make_grid(samples: usize, lines: usize) -> SampleGrid {
    let mut grid = SampleGrid::new(samples, lines, 1).unwrap();
    for y in 0..lines {
        for x in 0..samples {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            grid.set(y, x, value as f32 / 255.0);
        }
    }
    grid
}

fn extract_mask(grid: &SampleGrid, x0: usize, y0: usize, samples: usize, lines: usize) -> SampleGrid {
    let mut mask = SampleGrid::new(samples, lines, 1).unwrap();
    for y in 0..lines {
        for x in 0..samples {
            mask.set(y, x, grid.get(y0 + y, x0 + x));
        }
    }
    mask
}

fn bench_statistics(c: &mut Criterion) {
    let grid = make_grid(512, 512);
    let region = Region::full(&grid);

    c.bench_function("stats_two_pass_512", |b| {
        b.iter(|| black_box(stats::two_pass(&grid, region).unwrap()));
    });
    c.bench_function("stats_divide_conquer_512", |b| {
        b.iter(|| black_box(stats::divide_conquer(&grid, region).unwrap()));
    });
    c.bench_function("stats_forward_512", |b| {
        b.iter(|| black_box(stats::forward(&grid, region).unwrap()));
    });

    #[cfg(feature = "rayon")]
    {
        c.bench_function("stats_divide_conquer_512_parallel", |b| {
            b.iter(|| black_box(stats::rayon::divide_conquer_par(&grid, region).unwrap()));
        });
        c.bench_function("stats_forward_512_parallel", |b| {
            b.iter(|| black_box(stats::rayon::forward_par(&grid, region).unwrap()));
        });
    }
}

fn bench_matching(c: &mut Criterion) {
    let reference = make_grid(256, 256);
    let mask = extract_mask(&reference, 96, 80, 32, 32);

    c.bench_function("correlate_256_mask32", |b| {
        b.iter(|| black_box(correlate(&reference, &mask).unwrap()));
    });
    c.bench_function("absolute_difference_256_mask32", |b| {
        b.iter(|| black_box(absolute_difference(&reference, &mask).unwrap()));
    });

    #[cfg(feature = "rayon")]
    {
        use gridscan::search::rayon::correlate_par;
        c.bench_function("correlate_256_mask32_parallel", |b| {
            b.iter(|| black_box(correlate_par(&reference, &mask).unwrap()));
        });
    }
}

fn bench_filters(c: &mut Criterion) {
    let grid = make_grid(256, 256);
    let kernel = Kernel::box_blur(9).unwrap();

    c.bench_function("convolve_256_box9", |b| {
        b.iter(|| black_box(convolve(&grid, &kernel).unwrap()));
    });
    c.bench_function("median_256_window5", |b| {
        b.iter(|| black_box(median_filter(&grid, 5).unwrap()));
    });

    #[cfg(feature = "rayon")]
    {
        use gridscan::filter::rayon::convolve_par;
        c.bench_function("convolve_256_box9_parallel", |b| {
            b.iter(|| black_box(convolve_par(&grid, &kernel).unwrap()));
        });
    }
}

criterion_group!(benches, bench_statistics, bench_matching, bench_filters);
criterion_main!(benches);
