// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Randomized pixel transforms — band regrouping, glow emulation, darkening,
// and the channel perturbation helpers they share.

pub mod darken;
pub mod glow;
pub mod perturb;
pub mod regroup;

pub use darken::Darkener;
pub use glow::GlowEmulator;
pub use regroup::BandRegrouper;
