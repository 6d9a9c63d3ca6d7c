// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Row-major 2D pixel container with bounds-checked access.

use crate::error::{PixbandsError, Result};
use crate::types::{OPAQUE, Pixel};

/// A rectangular, row-major grid of pixels.
///
/// Width and height are always non-zero and `pixels.len() == width * height`.
/// Grids without an alpha channel keep every pixel at full opacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    has_alpha: bool,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    // -- Construction ---------------------------------------------------------

    /// Create a grid filled with a single pixel value.
    pub fn filled(width: u32, height: u32, has_alpha: bool, fill: Pixel) -> Result<Self> {
        check_dimensions(width, height)?;
        let fill = if has_alpha { fill } else { fill.with_alpha(OPAQUE) };
        Ok(Self {
            width,
            height,
            has_alpha,
            pixels: vec![fill; width as usize * height as usize],
        })
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(
        width: u32,
        height: u32,
        has_alpha: bool,
        mut pixels: Vec<Pixel>,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(PixbandsError::invalid_image(format!(
                "{width}x{height} grid needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        if !has_alpha {
            pixels.iter_mut().for_each(|px| px.a = OPAQUE);
        }
        Ok(Self {
            width,
            height,
            has_alpha,
            pixels,
        })
    }

    /// Build a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<Pixel>>, has_alpha: bool) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row_idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width)
        {
            return Err(PixbandsError::invalid_image(format!(
                "row {row_idx} has {} pixels, expected {width}",
                row.len()
            )));
        }
        let width = u32::try_from(width)
            .map_err(|_| PixbandsError::invalid_image("row length exceeds u32"))?;
        let height = u32::try_from(height)
            .map_err(|_| PixbandsError::invalid_image("row count exceeds u32"))?;
        Self::from_pixels(width, height, has_alpha, rows.into_iter().flatten().collect())
    }

    /// Build a grid from interleaved integer samples (3 = RGB, 4 = RGBA).
    ///
    /// Every sample must lie in `0..=255`.
    pub fn from_samples(width: u32, height: u32, channels: usize, samples: &[i32]) -> Result<Self> {
        check_dimensions(width, height)?;
        if channels != 3 && channels != 4 {
            return Err(PixbandsError::invalid_image(format!(
                "unsupported channel count {channels}, expected 3 or 4"
            )));
        }
        let expected = width as usize * height as usize * channels;
        if samples.len() != expected {
            return Err(PixbandsError::invalid_image(format!(
                "{width}x{height}x{channels} grid needs {expected} samples, got {}",
                samples.len()
            )));
        }
        if let Some((idx, value)) = samples
            .iter()
            .enumerate()
            .find(|(_, v)| !(0..=255).contains(*v))
        {
            return Err(PixbandsError::invalid_image(format!(
                "sample {idx} out of range: {value}"
            )));
        }

        let pixels = samples
            .chunks_exact(channels)
            .map(|px| {
                let alpha = if channels == 4 { px[3] as u8 } else { OPAQUE };
                Pixel::rgba(px[0] as u8, px[1] as u8, px[2] as u8, alpha)
            })
            .collect();
        Self::from_pixels(width, height, channels == 4, pixels)
    }

    /// An empty grid of the same shape, filled with transparent black (or
    /// opaque black when there is no alpha channel).
    pub fn blank_like(&self) -> Self {
        let fill = if self.has_alpha {
            Pixel::rgba(0, 0, 0, 0)
        } else {
            Pixel::rgb(0, 0, 0)
        };
        Self {
            width: self.width,
            height: self.height,
            has_alpha: self.has_alpha,
            pixels: vec![fill; self.pixels.len()],
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false: a grid holds at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major index of `(x, y)`, or `None` when out of bounds.
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// `(x, y)` position of a row-major index.
    pub fn position_of(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index % w) as u32, (index / w) as u32)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index_of(x, y).map(|idx| self.pixels[idx])
    }

    /// Overwrite the pixel at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<()> {
        let idx = self.index_of(x, y).ok_or_else(|| {
            PixbandsError::invalid_image(format!(
                "position ({x}, {y}) outside {}x{} grid",
                self.width, self.height
            ))
        })?;
        self.pixels[idx] = if self.has_alpha {
            pixel
        } else {
            pixel.with_alpha(OPAQUE)
        };
        Ok(())
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Mutable access to the raw buffer. Callers keep alpha at 255 for grids
    /// without an alpha channel.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Copy `tile` into this grid with its top-left corner at `(x0, y0)`.
    pub fn paste(&mut self, tile: &PixelGrid, x0: u32, y0: u32) -> Result<()> {
        let fits_x = x0.checked_add(tile.width).is_some_and(|end| end <= self.width);
        let fits_y = y0.checked_add(tile.height).is_some_and(|end| end <= self.height);
        if !fits_x || !fits_y {
            return Err(PixbandsError::invalid_image(format!(
                "{}x{} tile at ({x0}, {y0}) exceeds {}x{} grid",
                tile.width, tile.height, self.width, self.height
            )));
        }

        let stride = self.width as usize;
        for (row_idx, row) in tile.rows().enumerate() {
            let start = (y0 as usize + row_idx) * stride + x0 as usize;
            self.pixels[start..start + row.len()].copy_from_slice(row);
        }
        if !self.has_alpha {
            self.pixels.iter_mut().for_each(|px| px.a = OPAQUE);
        }
        Ok(())
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PixbandsError::invalid_image(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            PixelGrid::filled(0, 4, false, Pixel::rgb(1, 2, 3)),
            Err(PixbandsError::InvalidImage(_))
        ));
        assert!(matches!(
            PixelGrid::from_rows(Vec::new(), true),
            Err(PixbandsError::InvalidImage(_))
        ));
        assert!(matches!(
            PixelGrid::from_rows(vec![Vec::new()], true),
            Err(PixbandsError::InvalidImage(_))
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![
            vec![Pixel::rgb(0, 0, 0), Pixel::rgb(1, 1, 1)],
            vec![Pixel::rgb(2, 2, 2)],
        ];
        let err = PixelGrid::from_rows(rows, false).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn rejects_out_of_range_samples() {
        let err = PixelGrid::from_samples(1, 1, 3, &[0, 256, 0]).unwrap_err();
        assert!(matches!(err, PixbandsError::InvalidImage(_)));
        let err = PixelGrid::from_samples(1, 1, 4, &[0, 0, 0, -1]).unwrap_err();
        assert!(matches!(err, PixbandsError::InvalidImage(_)));
        assert!(PixelGrid::from_samples(1, 1, 2, &[0, 0]).is_err());
        assert!(PixelGrid::from_samples(2, 1, 3, &[0, 0, 0]).is_err());
    }

    #[test]
    fn samples_without_alpha_are_opaque() {
        let grid = PixelGrid::from_samples(2, 1, 3, &[10, 20, 30, 40, 50, 60]).unwrap();
        assert!(!grid.has_alpha());
        assert_eq!(grid.get(1, 0), Some(Pixel::rgb(40, 50, 60)));
    }

    #[test]
    fn bounds_checked_access() {
        let mut grid = PixelGrid::filled(3, 2, true, Pixel::rgba(0, 0, 0, 0)).unwrap();
        assert_eq!(grid.index_of(2, 1), Some(5));
        assert_eq!(grid.position_of(5), (2, 1));
        assert!(grid.get(3, 0).is_none());
        assert!(grid.set(0, 2, Pixel::rgb(1, 1, 1)).is_err());

        grid.set(1, 1, Pixel::rgba(9, 9, 9, 100)).unwrap();
        assert_eq!(grid.get(1, 1), Some(Pixel::rgba(9, 9, 9, 100)));
    }

    #[test]
    fn set_forces_opacity_without_alpha() {
        let mut grid = PixelGrid::filled(1, 1, false, Pixel::rgb(0, 0, 0)).unwrap();
        grid.set(0, 0, Pixel::rgba(5, 5, 5, 10)).unwrap();
        assert_eq!(grid.get(0, 0), Some(Pixel::rgb(5, 5, 5)));
    }

    #[test]
    fn paste_places_tile_and_checks_bounds() {
        let mut canvas = PixelGrid::filled(4, 4, false, Pixel::rgb(0, 0, 0)).unwrap();
        let tile = PixelGrid::filled(2, 2, false, Pixel::rgb(7, 7, 7)).unwrap();

        canvas.paste(&tile, 2, 2).unwrap();
        assert_eq!(canvas.get(2, 2), Some(Pixel::rgb(7, 7, 7)));
        assert_eq!(canvas.get(3, 3), Some(Pixel::rgb(7, 7, 7)));
        assert_eq!(canvas.get(1, 2), Some(Pixel::rgb(0, 0, 0)));

        assert!(canvas.paste(&tile, 3, 0).is_err());
        assert!(canvas.paste(&tile, u32::MAX, 0).is_err());
    }
}
