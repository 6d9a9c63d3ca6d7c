// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixbands — Core pixel, grid, band, and configuration types shared across crates.

pub mod config;
pub mod error;
pub mod grid;
pub mod types;

pub use config::{
    BlackLift, DarkenConfig, GlowConfig, IntensityTier, JitterStep, PixbandsConfig, RegroupConfig,
    StatsConfig, SynthConfig, rng_from_seed,
};
pub use error::PixbandsError;
pub use grid::PixelGrid;
pub use types::*;
