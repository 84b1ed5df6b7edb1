// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stylize filters — pixellate, crystallize, and edge detection.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use tracing::instrument;

/// Replace each `scale`-pixel square block with its mean colour.
///
/// Blocks are aligned to the top-left corner; partial blocks on the right
/// and bottom edges average only the pixels they cover.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn pixellate(image: &RgbaImage, scale: f32) -> RgbaImage {
    let block = scale.round().max(0.0) as u32;
    if block <= 1 {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let mut out = RgbaImage::new(width, height);
    for block_y in (0..height).step_by(block as usize) {
        for block_x in (0..width).step_by(block as usize) {
            let x_end = (block_x + block).min(width);
            let y_end = (block_y + block).min(height);

            let mut sum = [0u64; 4];
            for y in block_y..y_end {
                for x in block_x..x_end {
                    for (total, channel) in sum.iter_mut().zip(image.get_pixel(x, y).0) {
                        *total += u64::from(channel);
                    }
                }
            }
            let count = u64::from((x_end - block_x) * (y_end - block_y));
            let mean = Rgba(sum.map(|total| ((total + count / 2) / count) as u8));

            for y in block_y..y_end {
                for x in block_x..x_end {
                    out.put_pixel(x, y, mean);
                }
            }
        }
    }
    out
}

/// Voronoi "crystal" cells of roughly `radius` pixels.
///
/// One seed sits at a jittered position inside every `radius`-sized grid
/// cell; every pixel takes the colour found under its nearest seed. The
/// jitter is a fixed hash of the cell, so the pattern is stable across
/// recomputes.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn crystallize(image: &RgbaImage, radius: f32) -> RgbaImage {
    let pitch = radius.round().max(0.0) as u32;
    if pitch <= 1 {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let cells_x = width.div_ceil(pitch);
    let cells_y = height.div_ceil(pitch);

    let seed_at = |cell_x: u32, cell_y: u32| -> (u32, u32) {
        let hash = cell_hash(cell_x, cell_y);
        let jitter_x = (hash & 0xffff_ffff) as u32 % pitch;
        let jitter_y = (hash >> 32) as u32 % pitch;
        (
            (cell_x * pitch + jitter_x).min(width - 1),
            (cell_y * pitch + jitter_y).min(height - 1),
        )
    };

    RgbaImage::from_fn(width, height, |x, y| {
        let cell_x = x / pitch;
        let cell_y = y / pitch;
        let mut nearest = (u64::MAX, (x, y));

        for neighbour_y in cell_y.saturating_sub(1)..=(cell_y + 1).min(cells_y - 1) {
            for neighbour_x in cell_x.saturating_sub(1)..=(cell_x + 1).min(cells_x - 1) {
                let seed = seed_at(neighbour_x, neighbour_y);
                let dx = i64::from(seed.0) - i64::from(x);
                let dy = i64::from(seed.1) - i64::from(y);
                let distance = (dx * dx + dy * dy) as u64;
                if distance < nearest.0 {
                    nearest = (distance, seed);
                }
            }
        }
        *image.get_pixel(nearest.1.0, nearest.1.1)
    })
}

/// Sobel edge magnitude per colour channel, scaled by `intensity`.
///
/// Flat regions go black; alpha is kept from the source.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn edges(image: &RgbaImage, intensity: f32) -> RgbaImage {
    let gain = intensity.max(0.0) / 4.0;
    let mut out = image.clone();

    for channel in 0..3 {
        let plane = GrayImage::from_fn(image.width(), image.height(), |x, y| {
            Luma([image.get_pixel(x, y)[channel]])
        });
        let gx = horizontal_sobel(&plane);
        let gy = vertical_sobel(&plane);

        for (x, y, pixel) in out.enumerate_pixels_mut() {
            let h = f32::from(gx.get_pixel(x, y)[0]);
            let v = f32::from(gy.get_pixel(x, y)[0]);
            let magnitude = (h * h + v * v).sqrt() * gain;
            pixel[channel] = magnitude.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// SplitMix64 over the packed cell coordinates.
fn cell_hash(cell_x: u32, cell_y: u32) -> u64 {
    let mut z = ((u64::from(cell_x) << 32) | u64::from(cell_y)).wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
