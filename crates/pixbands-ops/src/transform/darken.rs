// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Darkening — subtract a fixed step from every visible pixel and randomly lift
// crushed blacks back to near-black grays.

use pixbands_core::error::Result;
use pixbands_core::{DarkenConfig, PixelGrid};
use rand::Rng;
use tracing::{debug, info, instrument};

/// Darkens visible pixels by a constant step.
///
/// Fully transparent pixels (alpha 0) are skipped. Pixels that reach pure
/// black get a small chance of becoming a near-black gray instead, so large
/// dark areas keep some texture.
#[derive(Debug, Clone)]
pub struct Darkener {
    config: DarkenConfig,
}

impl Darkener {
    pub fn new(config: DarkenConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DarkenConfig {
        &self.config
    }

    #[instrument(skip_all, fields(width = grid.width(), height = grid.height()))]
    pub fn darken<R: Rng + ?Sized>(&self, grid: &PixelGrid, rng: &mut R) -> PixelGrid {
        let step = self.config.step;
        info!(step, "Darkening image");

        let mut output = grid.clone();
        let mut lifted = 0usize;
        for px in output.pixels_mut() {
            if px.is_invisible() {
                continue;
            }
            let mut channels = px.channels().map(|c| c.saturating_sub(step));
            if channels == [0, 0, 0] {
                let draw: u8 = rng.random_range(1..=100);
                if let Some(level) = self.config.lift_for(draw) {
                    channels = [level; 3];
                    lifted += 1;
                }
            }
            *px = px.with_channels(channels);
        }

        debug!(lifted, "Darkening complete");
        output
    }

    pub fn darken_seeded(&self, grid: &PixelGrid) -> PixelGrid {
        let mut rng = self.config.rng();
        self.darken(grid, &mut rng)
    }
}
