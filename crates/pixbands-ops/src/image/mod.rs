// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — conversion between decoded `DynamicImage`s and pixel grids.

pub mod convert;

pub use convert::{grid_from_dynamic, grid_to_dynamic};
