// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: pixels, intensity bands, and ordered band tables.

use serde::{Deserialize, Serialize};

use crate::error::{PixbandsError, Result};

/// Alpha value of a fully opaque pixel.
pub const OPAQUE: u8 = 255;

/// Largest possible R+G+B sum for 8-bit channels.
pub const MAX_SUM: u16 = 765;

/// A single RGBA pixel with 8-bit channels.
///
/// Images without an alpha channel store `a = 255` for every pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Opaque pixel from its colour channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: OPAQUE }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scalar intensity R+G+B, in `0..=765`.
    pub fn sum(&self) -> u16 {
        self.r as u16 + self.g as u16 + self.b as u16
    }

    /// Whether the pixel has full opacity.
    pub fn is_opaque(&self) -> bool {
        self.a == OPAQUE
    }

    /// Whether the pixel is fully transparent (alpha 0).
    pub fn is_invisible(&self) -> bool {
        self.a == 0
    }

    /// The colour channels as `[r, g, b]`.
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Replace the colour channels, keeping alpha.
    pub fn with_channels(self, [r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b, a: self.a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// A closed interval `[lo, hi]` of R+G+B sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Band {
    pub lo: u16,
    pub hi: u16,
}

impl Band {
    pub const fn new(lo: u16, hi: u16) -> Self {
        Self { lo, hi }
    }

    /// Whether `sum` falls inside the band (both ends inclusive).
    pub fn contains(&self, sum: u16) -> bool {
        self.lo <= sum && sum <= self.hi
    }

    /// Whether the two bands share at least one sum value.
    pub fn overlaps(&self, other: &Band) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Ordered, non-overlapping set of bands covering `0..=765`.
///
/// A sum belongs to the first band that contains it. Tables built through
/// [`BandTable::new`] are validated; tables obtained by deserialization must
/// be checked with [`BandTable::validate`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandTable(Vec<Band>);

impl BandTable {
    /// Build a table, rejecting gaps, overlaps, and incomplete coverage.
    pub fn new(bands: Vec<Band>) -> Result<Self> {
        let table = Self(bands);
        table.validate()?;
        Ok(table)
    }

    /// Ten bands with boundaries at 60, 140, 220, ... 700. Default for regrouping.
    pub fn ten_band() -> Self {
        Self(vec![
            Band::new(0, 60),
            Band::new(61, 140),
            Band::new(141, 220),
            Band::new(221, 300),
            Band::new(301, 380),
            Band::new(381, 460),
            Band::new(461, 540),
            Band::new(541, 620),
            Band::new(621, 700),
            Band::new(701, MAX_SUM),
        ])
    }

    /// Five bands with boundaries at 60, 180, 390, 600. Default for statistics.
    pub fn five_band() -> Self {
        Self(vec![
            Band::new(0, 60),
            Band::new(61, 180),
            Band::new(181, 390),
            Band::new(391, 600),
            Band::new(601, MAX_SUM),
        ])
    }

    /// Check that the bands are in order, contiguous, and cover `0..=765`.
    pub fn validate(&self) -> Result<()> {
        let first = self
            .0
            .first()
            .ok_or_else(|| PixbandsError::configuration("band table is empty"))?;
        if first.lo != 0 {
            return Err(PixbandsError::configuration(format!(
                "band table must start at 0, first band is {first}"
            )));
        }

        for (idx, band) in self.0.iter().enumerate() {
            if band.lo > band.hi {
                return Err(PixbandsError::configuration(format!(
                    "band {idx} is inverted: {band}"
                )));
            }
            if let Some(next) = self.0.get(idx + 1) {
                // Integer sums: the next band must begin exactly one past this one.
                let expected = band.hi as u32 + 1;
                if (next.lo as u32) < expected {
                    return Err(PixbandsError::configuration(format!(
                        "bands {band} and {next} overlap"
                    )));
                }
                if next.lo as u32 > expected {
                    return Err(PixbandsError::configuration(format!(
                        "gap between bands {band} and {next}"
                    )));
                }
            }
        }

        let last = self.0[self.0.len() - 1];
        if last.hi < MAX_SUM {
            return Err(PixbandsError::configuration(format!(
                "band table ends at {}, must reach {MAX_SUM}",
                last.hi
            )));
        }
        Ok(())
    }

    /// Index of the first band containing `sum`.
    pub fn band_of(&self, sum: u16) -> Option<usize> {
        self.0.iter().position(|band| band.contains(sum))
    }

    pub fn get(&self, index: usize) -> Option<&Band> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Band] {
        &self.0
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::ten_band()
    }
}
