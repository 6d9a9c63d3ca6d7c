// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the pixel transforms in the pixbands-ops crate.
// Each benchmark runs on a synthetic gradient so every intensity band has
// members.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use pixbands_core::{GlowConfig, Pixel, PixelGrid, RegroupConfig, StatsConfig};
use pixbands_ops::{BandRegrouper, BandStatistics, GlowEmulator};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Build a `size x size` RGBA gradient with a transparent left column.
fn gradient(size: u32) -> PixelGrid {
    let pixels = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            let alpha = if x == 0 { 0 } else { 255 };
            Pixel::rgba((x * 255 / size) as u8, (y * 255 / size) as u8, 128, alpha)
        })
        .collect();
    PixelGrid::from_pixels(size, size, true, pixels).expect("valid fixture")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Band regrouping with default perturbation on a 256x256 image.
fn bench_regroup(c: &mut Criterion) {
    let grid = gradient(256);
    let regrouper = BandRegrouper::new(RegroupConfig::default()).expect("default config");

    c.bench_function("regroup (256x256)", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| black_box(regrouper.regroup(black_box(&grid), &mut rng)));
    });
}

/// One glow emulation pass (no tiling) on a 128x128 image.
fn bench_glow_emulate(c: &mut Criterion) {
    let grid = gradient(128);
    let emulator = GlowEmulator::new(GlowConfig::default()).expect("default config");

    c.bench_function("glow emulate (128x128)", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| black_box(emulator.emulate(black_box(&grid), &mut rng)));
    });
}

/// Five-band statistics on a 256x256 image.
fn bench_stats(c: &mut Criterion) {
    let grid = gradient(256);
    let stats = BandStatistics::new(StatsConfig::default()).expect("default config");

    c.bench_function("band statistics (256x256)", |b| {
        b.iter(|| black_box(stats.compute(black_box(&grid))));
    });
}

criterion_group!(benches, bench_regroup, bench_glow_emulate, bench_stats);
criterion_main!(benches);
