// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasterizer — turns a filter's output extent into a concrete bitmap, and the
// processed output handed to the display and the share surface.

use image::{DynamicImage, ImageFormat, RgbaImage};
use instafilter_core::error::{InstafilterError, Result};
use instafilter_core::{AppConfig, Extent, FilterKind, FilterParameters};
use tracing::{debug, instrument};

use crate::filters::FilterOutput;

/// Renders filter outputs into displayable bitmaps.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    max_output_pixels: u64,
}

impl Rasterizer {
    pub fn new(max_output_pixels: u64) -> Self {
        Self { max_output_pixels }
    }

    /// Render the whole output extent.
    ///
    /// Fails on an empty extent, on an extent larger than the pixel budget,
    /// or when the bitmap does not cover the extent it claims.
    #[instrument(skip(self, output), fields(extent = ?output.extent))]
    pub fn render(&self, output: FilterOutput) -> Result<RgbaImage> {
        let FilterOutput { image, extent } = output;
        if extent.is_empty() {
            return Err(InstafilterError::RasterizeFailed(
                "output extent is empty".into(),
            ));
        }
        if extent.area() > self.max_output_pixels {
            return Err(InstafilterError::RasterizeFailed(format!(
                "output extent {}x{} exceeds {} pixels",
                extent.width, extent.height, self.max_output_pixels
            )));
        }
        if image.dimensions() != (extent.width, extent.height) {
            return Err(InstafilterError::RasterizeFailed(format!(
                "bitmap {}x{} does not cover extent {}x{}",
                image.width(),
                image.height(),
                extent.width,
                extent.height
            )));
        }
        debug!("Output rasterized");
        Ok(image)
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(AppConfig::default().max_output_pixels)
    }
}

impl From<&AppConfig> for Rasterizer {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.max_output_pixels)
    }
}

/// A finished, displayable result of one pipeline pass.
///
/// Carries the inputs it was produced from so callers can tell which filter,
/// parameters, and source photo it reflects.
#[derive(Debug, Clone)]
pub struct ProcessedOutput {
    image: RgbaImage,
    extent: Extent,
    filter: FilterKind,
    parameters: FilterParameters,
    source_generation: u64,
}

impl ProcessedOutput {
    pub(crate) fn new(
        image: RgbaImage,
        extent: Extent,
        filter: FilterKind,
        parameters: FilterParameters,
        source_generation: u64,
    ) -> Self {
        Self {
            image,
            extent,
            filter,
            parameters,
            source_generation,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    pub fn parameters(&self) -> &FilterParameters {
        &self.parameters
    }

    pub fn source_generation(&self) -> u64 {
        self.source_generation
    }

    /// Encode as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        DynamicImage::ImageRgba8(self.image.clone())
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| InstafilterError::Encode(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// Encode as JPEG bytes with the given quality (1-100). Alpha is dropped.
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let rgb = DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        rgb.write_with_encoder(encoder)
            .map_err(|err| InstafilterError::Encode(format!("JPEG encoding failed: {}", err)))?;
        Ok(buffer)
    }
}
