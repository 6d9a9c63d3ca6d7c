// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Channel analysis — per-band histograms and distribution-driven synthesis.

pub mod stats;
pub mod synth;

pub use stats::BandStatistics;
pub use synth::FringeSynthesizer;
