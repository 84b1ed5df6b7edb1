// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-pixel colour filters: sepia tone and vignette.

use image::{Rgba, RgbaImage};
use tracing::instrument;

/// Radius at which the vignette reaches the corners at full strength.
const VIGNETTE_FULL_REACH_RADIUS: f32 = 100.0;

/// Sepia tone, blended with the original by `intensity` (0.0..=1.0).
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn sepia(image: &RgbaImage, intensity: f32) -> RgbaImage {
    let amount = intensity.clamp(0.0, 1.0);
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
        let sepia_r = 0.393 * r + 0.769 * g + 0.189 * b;
        let sepia_g = 0.349 * r + 0.686 * g + 0.168 * b;
        let sepia_b = 0.272 * r + 0.534 * g + 0.131 * b;
        let mix = |orig: f32, toned: f32| -> u8 {
            (orig + (toned - orig) * amount).round().clamp(0.0, 255.0) as u8
        };
        *pixel = Rgba([mix(r, sepia_r), mix(g, sepia_g), mix(b, sepia_b), a]);
    }
    out
}

/// Darken towards the corners.
///
/// `radius` controls how far in the fall-off reaches (at 100 the corners get
/// the full effect); `intensity` is the darkening depth at full reach. A
/// negative intensity brightens instead.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn vignette(image: &RgbaImage, radius: f32, intensity: f32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let half_diagonal = (center_x * center_x + center_y * center_y).sqrt().max(1.0);
    let reach = radius.max(0.0) / VIGNETTE_FULL_REACH_RADIUS;
    let depth = intensity.clamp(-1.0, 1.0);

    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center_x;
        let dy = y as f32 + 0.5 - center_y;
        let distance = (dx * dx + dy * dy).sqrt() / half_diagonal;
        let falloff = (distance * reach).clamp(0.0, 1.0);
        let factor = 1.0 - depth * falloff * falloff;

        let Rgba([r, g, b, a]) = *pixel;
        let shade = |channel: u8| (f32::from(channel) * factor).round().clamp(0.0, 255.0) as u8;
        *pixel = Rgba([shade(r), shade(g), shade(b), a]);
    }
    out
}
