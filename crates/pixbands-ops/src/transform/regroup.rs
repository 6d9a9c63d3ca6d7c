// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Band regrouping — shuffle opaque pixel colours within R+G+B intensity bands
// and perturb their channels, leaving transparent pixels exactly in place.

use image::DynamicImage;
use pixbands_core::error::Result;
use pixbands_core::{BandTable, OPAQUE, Pixel, PixelGrid, RegroupConfig};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

use crate::image::convert::{grid_from_dynamic, grid_to_dynamic};
use crate::transform::perturb::jitter_channels;

/// Positions and colours of every opaque pixel in one band, in row-major
/// scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandGroup {
    pub positions: Vec<usize>,
    pub colors: Vec<Pixel>,
}

impl BandGroup {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Result of a single scan over a grid.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// One group per band, in band-table order.
    pub groups: Vec<BandGroup>,
    /// Pixels copied through untouched, as `(index, original pixel)`.
    pub preserved: Vec<(usize, Pixel)>,
}

/// Split a grid into per-band groups of opaque pixels plus the transparent
/// pixels that must be written back verbatim.
pub fn partition(grid: &PixelGrid, bands: &BandTable) -> Partition {
    let mut groups = vec![BandGroup::default(); bands.len()];
    let mut preserved = Vec::new();

    for (idx, px) in grid.pixels().iter().enumerate() {
        if grid.has_alpha() && !px.is_opaque() {
            preserved.push((idx, *px));
            continue;
        }
        match bands.band_of(px.sum()) {
            Some(band) => {
                groups[band].positions.push(idx);
                groups[band].colors.push(*px);
            }
            None => {
                warn!(sum = px.sum(), index = idx, "Pixel sum outside band table; copying unchanged");
                preserved.push((idx, *px));
            }
        }
    }

    Partition { groups, preserved }
}

/// Shuffles opaque pixel colours within intensity bands and perturbs them.
///
/// The macro-level luminance distribution survives (colours never leave their
/// band) while the exact colour at each position is decorrelated.
///
/// ```ignore
/// let regrouper = BandRegrouper::new(RegroupConfig::default())?;
/// let shuffled = regrouper.regroup(&grid, &mut rand::rng());
/// ```
#[derive(Debug, Clone)]
pub struct BandRegrouper {
    config: RegroupConfig,
}

impl BandRegrouper {
    /// Validate `config` and build a regrouper from it.
    pub fn new(config: RegroupConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RegroupConfig {
        &self.config
    }

    /// Produce a regrouped copy of `grid`. The input is never modified.
    #[instrument(skip_all, fields(width = grid.width(), height = grid.height()))]
    pub fn regroup<R: Rng + ?Sized>(&self, grid: &PixelGrid, rng: &mut R) -> PixelGrid {
        let Partition { groups, preserved } = partition(grid, &self.config.bands);
        info!(
            bands = groups.len(),
            transparent = preserved.len(),
            probability = self.config.perturb_probability,
            "Regrouping pixels within bands"
        );

        let mut output = grid.blank_like();
        let out = output.pixels_mut();

        for (band_idx, group) in groups.into_iter().enumerate() {
            if group.is_empty() {
                continue;
            }
            debug!(band = band_idx, members = group.len(), "Shuffling band");

            let BandGroup {
                positions,
                mut colors,
            } = group;
            colors.shuffle(rng);

            for (pos, color) in positions.into_iter().zip(colors) {
                let perturbed = jitter_channels(
                    color,
                    self.config.perturb_probability,
                    self.config.perturb_magnitude,
                    rng,
                );
                out[pos] = perturbed.with_alpha(OPAQUE);
            }
        }

        for (pos, px) in preserved {
            out[pos] = px;
        }

        debug!("Regroup complete");
        output
    }

    /// Regroup using the random source described by the config seed.
    pub fn regroup_seeded(&self, grid: &PixelGrid) -> PixelGrid {
        let mut rng = self.config.rng();
        self.regroup(grid, &mut rng)
    }
}

/// Regroup a decoded image in one call, using the config's seed (or the OS
/// when unset).
pub fn regroup_image(image: &DynamicImage, config: &RegroupConfig) -> Result<DynamicImage> {
    let regrouper = BandRegrouper::new(config.clone())?;
    let grid = grid_from_dynamic(image)?;
    Ok(grid_to_dynamic(&regrouper.regroup_seeded(&grid)))
}
