// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter engine — the seven app filters running on the CPU over RGBA8 images.

pub mod blur;
pub mod color;
pub mod stylize;

use image::RgbaImage;
use instafilter_core::{Extent, FilterKind, FilterParameters};
use tracing::{debug, instrument, warn};

use crate::decode::SourceImage;

/// Default values each filter uses for parameters the caller left unset.
pub mod defaults {
    pub const SEPIA_INTENSITY: f32 = 1.0;
    pub const EDGES_INTENSITY: f32 = 1.0;
    pub const BLUR_RADIUS: f32 = 10.0;
    pub const CRYSTALLIZE_RADIUS: f32 = 20.0;
    pub const PIXELLATE_SCALE: f32 = 8.0;
    pub const UNSHARP_RADIUS: f32 = 2.5;
    pub const UNSHARP_INTENSITY: f32 = 0.5;
    pub const VIGNETTE_RADIUS: f32 = 1.0;
    pub const VIGNETTE_INTENSITY: f32 = 0.0;
}

/// The result of one filter pass: pixels covering `extent`.
#[derive(Debug, Clone)]
pub struct FilterOutput {
    pub image: RgbaImage,
    pub extent: Extent,
}

impl FilterOutput {
    /// Output whose extent is the image itself, anchored at the origin.
    pub fn same_extent(image: RgbaImage) -> Self {
        let extent = Extent::from_size(image.width(), image.height());
        Self { image, extent }
    }
}

/// Runs a filter over a source image.
///
/// Returns `None` when the filter cannot produce an output for this input.
pub trait FilterEngine {
    fn apply(
        &self,
        filter: FilterKind,
        params: &FilterParameters,
        source: &SourceImage,
    ) -> Option<FilterOutput>;
}

/// Pure-Rust engine built on `image` and `imageproc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuFilterEngine;

impl FilterEngine for CpuFilterEngine {
    #[instrument(skip(self, params, source), fields(generation = source.generation()))]
    fn apply(
        &self,
        filter: FilterKind,
        params: &FilterParameters,
        source: &SourceImage,
    ) -> Option<FilterOutput> {
        let image = source.image();
        if image.width() == 0 || image.height() == 0 {
            warn!("Refusing to filter an empty image");
            return None;
        }
        if !params.is_finite() {
            warn!(?params, "Refusing non-finite filter parameters");
            return None;
        }
        debug!(?params, "Applying filter");

        let output = match filter {
            FilterKind::SepiaTone => FilterOutput::same_extent(color::sepia(
                image,
                params.intensity.unwrap_or(defaults::SEPIA_INTENSITY),
            )),
            FilterKind::Vignette => FilterOutput::same_extent(color::vignette(
                image,
                params.radius.unwrap_or(defaults::VIGNETTE_RADIUS),
                params.intensity.unwrap_or(defaults::VIGNETTE_INTENSITY),
            )),
            FilterKind::GaussianBlur => {
                blur::gaussian_blur(image, params.radius.unwrap_or(defaults::BLUR_RADIUS))
            }
            FilterKind::UnsharpMask => FilterOutput::same_extent(blur::unsharp_mask(
                image,
                params.radius.unwrap_or(defaults::UNSHARP_RADIUS),
                params.intensity.unwrap_or(defaults::UNSHARP_INTENSITY),
            )),
            FilterKind::Pixellate => FilterOutput::same_extent(stylize::pixellate(
                image,
                params.scale.unwrap_or(defaults::PIXELLATE_SCALE),
            )),
            FilterKind::Crystallize => FilterOutput::same_extent(stylize::crystallize(
                image,
                params.radius.unwrap_or(defaults::CRYSTALLIZE_RADIUS),
            )),
            FilterKind::Edges => FilterOutput::same_extent(stylize::edges(
                image,
                params.intensity.unwrap_or(defaults::EDGES_INTENSITY),
            )),
        };
        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use instafilter_core::ParameterKind;

    fn gradient(width: u32, height: u32) -> SourceImage {
        SourceImage::new(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, 128, 255])
        }))
    }

    #[test]
    fn every_filter_produces_output_at_every_slider_stop() {
        let source = gradient(16, 12);
        for filter in FilterKind::ALL {
            for intensity in [0.0, 0.05, 0.5, 1.0] {
                let params = FilterParameters::for_filter(filter, intensity);
                let output = CpuFilterEngine
                    .apply(filter, &params, &source)
                    .unwrap_or_else(|| panic!("{filter} at {intensity} gave no output"));
                assert_eq!(output.image.width(), output.extent.width);
                assert_eq!(output.image.height(), output.extent.height);
            }
        }
    }

    #[test]
    fn empty_source_gives_no_output() {
        let source = SourceImage::new(RgbaImage::new(0, 0));
        let params = FilterParameters::for_filter(FilterKind::SepiaTone, 0.5);
        assert!(CpuFilterEngine.apply(FilterKind::SepiaTone, &params, &source).is_none());
    }

    #[test]
    fn non_finite_parameters_give_no_output() {
        let mut params = FilterParameters::default();
        params.set(ParameterKind::Radius, f32::INFINITY);
        assert!(
            CpuFilterEngine
                .apply(FilterKind::GaussianBlur, &params, &gradient(4, 4))
                .is_none()
        );
    }

    /// Unset parameters fall back to the filter's defaults instead of failing.
    #[test]
    fn missing_parameters_use_defaults() {
        let output = CpuFilterEngine
            .apply(FilterKind::GaussianBlur, &FilterParameters::default(), &gradient(8, 8))
            .unwrap();
        assert_eq!(output.extent, Extent::from_size(8, 8).outset(30));
    }
}
