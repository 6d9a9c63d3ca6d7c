// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Band statistics — per-band channel histograms and averages over visible
// pixels.

use pixbands_core::error::Result;
use pixbands_core::{Band, PixelGrid, StatsConfig};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Counts of one channel value across R, G, and B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramRow {
    pub value: u8,
    pub r: u64,
    pub g: u64,
    pub b: u64,
}

/// Mean channel values, rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChannelAverage {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandHistogram {
    pub band: Band,
    pub pixel_count: u64,
    /// Only values with at least one non-zero count, ascending.
    pub rows: Vec<HistogramRow>,
    pub average: ChannelAverage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub bands: Vec<BandHistogram>,
    /// Visible pixels counted across all bands.
    pub pixel_count: u64,
    pub overall: ChannelAverage,
}

/// Running per-channel histogram plus totals.
#[derive(Clone)]
struct Accumulator {
    counts: [[u64; 256]; 3],
    sums: [u64; 3],
    pixels: u64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            counts: [[0; 256]; 3],
            sums: [0; 3],
            pixels: 0,
        }
    }

    fn add(&mut self, channels: [u8; 3]) {
        for (ch, value) in channels.into_iter().enumerate() {
            self.counts[ch][value as usize] += 1;
            self.sums[ch] += value as u64;
        }
        self.pixels += 1;
    }

    fn average(&self) -> ChannelAverage {
        if self.pixels == 0 {
            return ChannelAverage::default();
        }
        let mean = |ch: usize| round2(self.sums[ch] as f64 / self.pixels as f64);
        ChannelAverage {
            r: mean(0),
            g: mean(1),
            b: mean(2),
        }
    }

    fn rows(&self) -> Vec<HistogramRow> {
        (0..256usize)
            .filter_map(|value| {
                let [r, g, b] = [0, 1, 2].map(|ch| self.counts[ch][value]);
                (r + g + b > 0).then_some(HistogramRow {
                    value: value as u8,
                    r,
                    g,
                    b,
                })
            })
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes channel statistics grouped by intensity band.
#[derive(Debug, Clone)]
pub struct BandStatistics {
    config: StatsConfig,
}

impl BandStatistics {
    pub fn new(config: StatsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Histogram every visible (alpha ≠ 0) pixel into its band.
    #[instrument(skip_all, fields(width = grid.width(), height = grid.height()))]
    pub fn compute(&self, grid: &PixelGrid) -> StatisticsReport {
        let bands = &self.config.bands;
        info!(bands = bands.len(), "Computing band statistics");

        let mut per_band = vec![Accumulator::new(); bands.len()];
        let mut overall = Accumulator::new();

        for px in grid.pixels().iter().filter(|px| !px.is_invisible()) {
            let channels = px.channels();
            overall.add(channels);
            if let Some(band) = bands.band_of(px.sum()) {
                per_band[band].add(channels);
            }
        }

        if overall.pixels == 0 {
            warn!("No visible pixels; statistics are empty");
        }

        let histograms = bands
            .iter()
            .zip(&per_band)
            .map(|(band, acc)| BandHistogram {
                band: *band,
                pixel_count: acc.pixels,
                rows: acc.rows(),
                average: acc.average(),
            })
            .collect();

        debug!(pixels = overall.pixels, "Band statistics complete");
        StatisticsReport {
            bands: histograms,
            pixel_count: overall.pixels,
            overall: overall.average(),
        }
    }
}
