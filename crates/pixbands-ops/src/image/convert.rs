// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion between `image::DynamicImage` and `PixelGrid`. Decoding and
// encoding remain the caller's concern; only already-decoded buffers cross
// this boundary.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use pixbands_core::error::Result;
use pixbands_core::{Pixel, PixelGrid};
use tracing::debug;

/// Copy a decoded image into a pixel grid.
///
/// The grid carries an alpha channel exactly when the source colour type
/// does. Every source format is widened or narrowed to 8-bit RGBA first.
pub fn grid_from_dynamic(image: &DynamicImage) -> Result<PixelGrid> {
    let has_alpha = image.color().has_alpha();
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let pixels = rgba
        .pixels()
        .map(|px| {
            let Rgba([r, g, b, a]) = *px;
            Pixel::rgba(r, g, b, a)
        })
        .collect();

    debug!(width, height, has_alpha, "Image converted to pixel grid");
    PixelGrid::from_pixels(width, height, has_alpha, pixels)
}

/// Build an `image` buffer from a grid: RGBA8 with alpha, RGB8 without.
pub fn grid_to_dynamic(grid: &PixelGrid) -> DynamicImage {
    let (width, height) = grid.dimensions();
    let at = |x: u32, y: u32| grid.pixels()[y as usize * width as usize + x as usize];

    if grid.has_alpha() {
        let buffer = RgbaImage::from_fn(width, height, |x, y| {
            let px = at(x, y);
            Rgba([px.r, px.g, px.b, px.a])
        });
        DynamicImage::ImageRgba8(buffer)
    } else {
        let buffer = RgbImage::from_fn(width, height, |x, y| {
            let px = at(x, y);
            Rgb([px.r, px.g, px.b])
        });
        DynamicImage::ImageRgb8(buffer)
    }
}
