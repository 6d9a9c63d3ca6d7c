// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outer-glow emulation — whole-image colour shuffle, uniform channel jitter,
// and intensity-tiered jitter, repeated independently into a tiled sheet.

use pixbands_core::error::{PixbandsError, Result};
use pixbands_core::{GlowConfig, Pixel, PixelGrid};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

use crate::transform::perturb::{jitter_channels, jitter_pixel};

/// Emulates a soft outer-glow texture by scrambling and jittering pixels.
///
/// Unlike [`BandRegrouper`](crate::BandRegrouper), the shuffle here ignores
/// intensity: every colour may land anywhere, while each position keeps its
/// own alpha value.
#[derive(Debug, Clone)]
pub struct GlowEmulator {
    config: GlowConfig,
}

impl GlowEmulator {
    pub fn new(config: GlowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GlowConfig {
        &self.config
    }

    // -- Passes (mutate in place) --------------------------------------------

    /// Permute colour channels across all positions; alpha stays put.
    pub fn shuffle_colors<R: Rng + ?Sized>(&self, grid: &mut PixelGrid, rng: &mut R) {
        let mut colors: Vec<[u8; 3]> = grid.pixels().iter().map(Pixel::channels).collect();
        colors.shuffle(rng);
        for (px, color) in grid.pixels_mut().iter_mut().zip(colors) {
            *px = px.with_channels(color);
        }
    }

    /// Nudge each channel with the configured uniform probability.
    pub fn uniform_jitter<R: Rng + ?Sized>(&self, grid: &mut PixelGrid, rng: &mut R) {
        let (probability, magnitude) =
            (self.config.uniform_probability, self.config.uniform_magnitude);
        for px in grid.pixels_mut() {
            *px = jitter_channels(*px, probability, magnitude, rng);
        }
    }

    /// Apply the tier table: one uniform draw per pixel picks the step, then
    /// every colour channel moves by that step with its own sign.
    pub fn intensity_jitter<R: Rng + ?Sized>(&self, grid: &mut PixelGrid, rng: &mut R) {
        let mut touched = 0usize;
        for px in grid.pixels_mut() {
            let Some(tier) = self.config.tier_for(px.sum()) else {
                continue;
            };
            let draw: f64 = rng.random();
            if let Some(magnitude) = tier.magnitude_for(draw) {
                *px = jitter_pixel(*px, magnitude, rng);
                touched += 1;
            }
        }
        debug!(touched, "Intensity jitter applied");
    }

    // -- Pipelines -----------------------------------------------------------

    /// Run shuffle, uniform jitter, and intensity jitter on a copy of `grid`.
    #[instrument(skip_all, fields(width = grid.width(), height = grid.height()))]
    pub fn emulate<R: Rng + ?Sized>(&self, grid: &PixelGrid, rng: &mut R) -> PixelGrid {
        let mut working = grid.clone();
        self.shuffle_colors(&mut working, rng);
        self.uniform_jitter(&mut working, rng);
        self.intensity_jitter(&mut working, rng);
        working
    }

    /// Tile `columns x rows` independent emulations of `grid` into one sheet,
    /// filling tiles left to right, top to bottom.
    #[instrument(skip_all, fields(width = grid.width(), height = grid.height()))]
    pub fn render_sheet<R: Rng + ?Sized>(
        &self,
        grid: &PixelGrid,
        rng: &mut R,
    ) -> Result<PixelGrid> {
        let (columns, rows) = (self.config.columns, self.config.rows);
        let (tile_w, tile_h) = grid.dimensions();
        let sheet_w = tile_w.checked_mul(columns);
        let sheet_h = tile_h.checked_mul(rows);
        let (Some(sheet_w), Some(sheet_h)) = (sheet_w, sheet_h) else {
            return Err(PixbandsError::invalid_image(format!(
                "{columns}x{rows} sheet of {tile_w}x{tile_h} tiles overflows"
            )));
        };
        info!(columns, rows, sheet_w, sheet_h, "Rendering glow sheet");

        let blank = Pixel::rgba(0, 0, 0, 0);
        let mut sheet = PixelGrid::filled(sheet_w, sheet_h, grid.has_alpha(), blank)?;
        for row in 0..rows {
            for col in 0..columns {
                let tile = self.emulate(grid, rng);
                sheet.paste(&tile, col * tile_w, row * tile_h)?;
            }
        }

        debug!("Glow sheet complete");
        Ok(sheet)
    }

    /// Render the sheet with the random source described by the config seed.
    pub fn render_sheet_seeded(&self, grid: &PixelGrid) -> Result<PixelGrid> {
        let mut rng = self.config.rng();
        self.render_sheet(grid, &mut rng)
    }
}
