// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Channel perturbation — small random ± nudges clamped to [0, 255]. Alpha is
// never touched.

use pixbands_core::Pixel;
use rand::Rng;

/// Move `value` up or down by `magnitude` with equal chance, saturating at the
/// channel limits.
pub fn nudge_channel<R: Rng + ?Sized>(value: u8, magnitude: u8, rng: &mut R) -> u8 {
    if rng.random_bool(0.5) {
        value.saturating_add(magnitude)
    } else {
        value.saturating_sub(magnitude)
    }
}

/// Nudge each colour channel independently with chance `probability`.
///
/// `probability` must lie in `[0, 1]`; configs validate this up front.
pub fn jitter_channels<R: Rng + ?Sized>(
    pixel: Pixel,
    probability: f64,
    magnitude: u8,
    rng: &mut R,
) -> Pixel {
    let channels = pixel.channels().map(|channel| {
        if rng.random_bool(probability) {
            nudge_channel(channel, magnitude, rng)
        } else {
            channel
        }
    });
    pixel.with_channels(channels)
}

/// Nudge all three colour channels, each with its own sign.
pub fn jitter_pixel<R: Rng + ?Sized>(pixel: Pixel, magnitude: u8, rng: &mut R) -> Pixel {
    let channels = pixel
        .channels()
        .map(|channel| nudge_channel(channel, magnitude, rng));
    pixel.with_channels(channels)
}
