// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gaussian blur and unsharp mask.
//
// The blur does not clip to the source: its output extent grows by three
// sigmas on every side and the fall-off fades into transparency. Blurring
// happens on premultiplied pixels so that fade does not darken the colours.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::filter::gaussian_blur_f32;
use instafilter_core::Extent;
use tracing::{debug, instrument};

use super::FilterOutput;

/// Below this sigma a blur is visually a no-op (and imageproc rejects zero).
const MIN_SIGMA: f32 = 0.1;

/// Above this sigma the blur runs on a downsampled copy.
const DOWNSAMPLE_SIGMA: f32 = 8.0;

/// Sigma used on the downsampled copy.
const REDUCED_SIGMA: f32 = 4.0;

/// Gaussian blur with sigma = `radius`, spreading beyond the source bounds.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn gaussian_blur(image: &RgbaImage, radius: f32) -> FilterOutput {
    if radius < MIN_SIGMA {
        return FilterOutput::same_extent(image.clone());
    }

    let pad = (3.0 * radius).ceil() as u32;
    let mut padded = RgbaImage::new(image.width() + 2 * pad, image.height() + 2 * pad);
    imageops::replace(&mut padded, image, i64::from(pad), i64::from(pad));

    premultiply(&mut padded);
    let mut blurred = blur_rgba(&padded, radius);
    unpremultiply(&mut blurred);

    FilterOutput {
        image: blurred,
        extent: Extent::from_size(image.width(), image.height()).outset(pad),
    }
}

/// Sharpen by adding back `intensity` times the detail a blur of `radius`
/// removes. Keeps the source extent.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn unsharp_mask(image: &RgbaImage, radius: f32, intensity: f32) -> RgbaImage {
    if radius < MIN_SIGMA || intensity == 0.0 {
        return image.clone();
    }

    let blurred = blur_rgba(image, radius);
    let mut out = image.clone();
    for (pixel, soft) in out.pixels_mut().zip(blurred.pixels()) {
        let Rgba([r, g, b, a]) = *pixel;
        let sharpen = |sharp: u8, soft: u8| -> u8 {
            let sharp = f32::from(sharp);
            (sharp + intensity * (sharp - f32::from(soft)))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        *pixel = Rgba([
            sharpen(r, soft[0]),
            sharpen(g, soft[1]),
            sharpen(b, soft[2]),
            a,
        ]);
    }
    out
}

/// Gaussian blur; large sigmas run on a downsampled copy and are scaled back.
pub(crate) fn blur_rgba(image: &RgbaImage, sigma: f32) -> RgbaImage {
    if sigma <= DOWNSAMPLE_SIGMA {
        return gaussian_blur_f32(image, sigma);
    }

    let (width, height) = image.dimensions();
    let factor = sigma / REDUCED_SIGMA;
    let small_w = ((width as f32 / factor).ceil() as u32).max(1);
    let small_h = ((height as f32 / factor).ceil() as u32).max(1);
    debug!(sigma, small_w, small_h, "Blurring downsampled copy");

    let small = imageops::resize(image, small_w, small_h, FilterType::Triangle);
    let small = gaussian_blur_f32(&small, REDUCED_SIGMA);
    imageops::resize(&small, width, height, FilterType::Triangle)
}

fn premultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let alpha = u16::from(pixel[3]);
        for channel in 0..3 {
            pixel[channel] = ((u16::from(pixel[channel]) * alpha + 127) / 255) as u8;
        }
    }
}

fn unpremultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let alpha = u16::from(pixel[3]);
        if alpha == 0 {
            *pixel = Rgba([0, 0, 0, 0]);
            continue;
        }
        for channel in 0..3 {
            let value = (u16::from(pixel[channel]) * 255 + alpha / 2) / alpha;
            pixel[channel] = value.min(255) as u8;
        }
    }
}
