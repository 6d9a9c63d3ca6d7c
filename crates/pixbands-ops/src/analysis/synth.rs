// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fringe synthesis — estimate each channel's value distribution from an image
// and sample brand-new pixels from it.

use pixbands_core::error::{PixbandsError, Result};
use pixbands_core::{Pixel, PixelGrid, SynthConfig};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use tracing::{debug, info, instrument};

/// Colour channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// Empirical distribution of values 0..=255 for each colour channel.
///
/// Built from every pixel of a grid; alpha is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDistribution {
    counts: [[u64; 256]; 3],
    total: u64,
}

impl ChannelDistribution {
    pub fn from_grid(grid: &PixelGrid) -> Self {
        let mut counts = [[0u64; 256]; 3];
        for px in grid.pixels() {
            for (ch, value) in px.channels().into_iter().enumerate() {
                counts[ch][value as usize] += 1;
            }
        }
        Self {
            counts,
            total: grid.len() as u64,
        }
    }

    /// Number of pixels the distribution was built from.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, channel: Channel, value: u8) -> u64 {
        self.counts[channel.index()][value as usize]
    }

    /// Relative frequency of `value` in `channel`.
    pub fn probability(&self, channel: Channel, value: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(channel, value) as f64 / self.total as f64
    }

    fn sampler(&self, channel: Channel) -> Result<WeightedIndex<u64>> {
        WeightedIndex::new(&self.counts[channel.index()]).map_err(|err| {
            PixbandsError::invalid_image(format!("cannot sample {channel:?} channel: {err}"))
        })
    }
}

/// Sample a new opaque RGB grid whose channels independently follow `distribution`.
pub fn synthesize<R: Rng + ?Sized>(
    distribution: &ChannelDistribution,
    width: u32,
    height: u32,
    rng: &mut R,
) -> Result<PixelGrid> {
    let mut grid = PixelGrid::filled(width, height, false, Pixel::rgb(0, 0, 0))?;
    let red = distribution.sampler(Channel::Red)?;
    let green = distribution.sampler(Channel::Green)?;
    let blue = distribution.sampler(Channel::Blue)?;

    for px in grid.pixels_mut() {
        let r = red.sample(rng) as u8;
        let g = green.sample(rng) as u8;
        let b = blue.sample(rng) as u8;
        *px = Pixel::rgb(r, g, b);
    }
    Ok(grid)
}

/// Generates images with the same per-channel value statistics as a source.
#[derive(Debug, Clone)]
pub struct FringeSynthesizer {
    config: SynthConfig,
}

impl FringeSynthesizer {
    pub fn new(config: SynthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Measure `source` and sample a grid of the configured size from it.
    #[instrument(skip_all, fields(width = source.width(), height = source.height()))]
    pub fn generate<R: Rng + ?Sized>(&self, source: &PixelGrid, rng: &mut R) -> Result<PixelGrid> {
        let (width, height) = (self.config.width, self.config.height);
        info!(out_w = width, out_h = height, "Synthesizing from channel distribution");

        let distribution = ChannelDistribution::from_grid(source);
        let grid = synthesize(&distribution, width, height, rng)?;

        debug!(samples = grid.len(), "Synthesis complete");
        Ok(grid)
    }

    pub fn generate_seeded(&self, source: &PixelGrid) -> Result<PixelGrid> {
        let mut rng = self.config.rng();
        self.generate(source, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn distribution_counts_every_pixel() {
        let grid = PixelGrid::from_pixels(
            4,
            1,
            true,
            vec![
                Pixel::rgba(0, 10, 255, 0),
                Pixel::rgba(0, 10, 255, 255),
                Pixel::rgba(0, 20, 255, 255),
                Pixel::rgba(9, 20, 255, 128),
            ],
        )
        .unwrap();
        let dist = ChannelDistribution::from_grid(&grid);

        assert_eq!(dist.total(), 4);
        assert_eq!(dist.count(Channel::Red, 0), 3);
        assert_eq!(dist.probability(Channel::Red, 9), 0.25);
        assert_eq!(dist.probability(Channel::Green, 10), 0.5);
        assert_eq!(dist.probability(Channel::Blue, 255), 1.0);
        assert_eq!(dist.probability(Channel::Blue, 0), 0.0);
    }

    #[test]
    fn samples_only_observed_values() {
        let grid = PixelGrid::from_pixels(
            2,
            1,
            false,
            vec![Pixel::rgb(255, 0, 7), Pixel::rgb(250, 0, 9)],
        )
        .unwrap();
        let synth = FringeSynthesizer::new(SynthConfig {
            width: 30,
            height: 20,
            seed: Some(1),
        })
        .unwrap();
        let out = synth.generate_seeded(&grid).unwrap();

        assert_eq!(out.dimensions(), (30, 20));
        assert!(!out.has_alpha());
        for px in out.pixels() {
            assert!(px.r == 255 || px.r == 250);
            assert_eq!(px.g, 0);
            assert!(px.b == 7 || px.b == 9);
        }
        assert!(out.pixels().iter().any(|px| px.r == 250));
        assert!(out.pixels().iter().any(|px| px.r == 255));
    }

    #[test]
    fn sampled_frequencies_track_source() {
        // 3:1 ratio of 100 to 200 in the red channel.
        let mut pixels = vec![Pixel::rgb(100, 0, 0); 3];
        pixels.push(Pixel::rgb(200, 0, 0));
        let grid = PixelGrid::from_pixels(4, 1, false, pixels).unwrap();
        let dist = ChannelDistribution::from_grid(&grid);

        let out = synthesize(&dist, 100, 100, &mut StdRng::seed_from_u64(2)).unwrap();
        let hundreds = out.pixels().iter().filter(|px| px.r == 100).count();
        assert!(hundreds > 7200 && hundreds < 7800, "hundreds = {hundreds}");
    }

    #[test]
    fn zero_size_is_invalid() {
        let grid = PixelGrid::filled(1, 1, false, Pixel::rgb(1, 1, 1)).unwrap();
        let dist = ChannelDistribution::from_grid(&grid);
        assert!(matches!(
            synthesize(&dist, 0, 10, &mut StdRng::seed_from_u64(3)),
            Err(PixbandsError::InvalidImage(_))
        ));
        assert!(matches!(
            FringeSynthesizer::new(SynthConfig {
                height: 0,
                ..SynthConfig::default()
            }),
            Err(PixbandsError::Configuration(_))
        ));
    }

    #[test]
    fn same_seed_same_output() {
        let grid = PixelGrid::from_samples(2, 2, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]).unwrap();
        let synth = FringeSynthesizer::new(SynthConfig {
            width: 16,
            height: 16,
            seed: Some(4),
        })
        .unwrap();
        assert_eq!(
            synth.generate_seeded(&grid).unwrap(),
            synth.generate_seeded(&grid).unwrap()
        );
    }
}
