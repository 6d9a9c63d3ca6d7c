// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pixbands-ops — Pixel-level transforms for decoded raster images.
//
// Provides band-aware regrouping with channel perturbation, outer-glow sheet
// emulation, darkening, per-band channel statistics, and distribution-based
// image synthesis. Conversion to and from `image::DynamicImage` lives in the
// `image` module; decoding and encoding stay with the caller.

pub mod analysis;
pub mod image;
pub mod transform;

// Re-export the primary structs so callers can use `pixbands_ops::BandRegrouper` etc.
pub use analysis::stats::{BandStatistics, StatisticsReport};
pub use analysis::synth::{ChannelDistribution, FringeSynthesizer};
pub use crate::image::convert::{grid_from_dynamic, grid_to_dynamic};
pub use transform::darken::Darkener;
pub use transform::glow::GlowEmulator;
pub use transform::regroup::{BandRegrouper, regroup_image};
