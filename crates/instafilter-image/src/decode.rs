// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo decoding — raw bytes from the photo source to an upright, size-capped
// RGBA bitmap ready for filtering.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use instafilter_core::AppConfig;
use instafilter_core::error::{InstafilterError, Result};
use tracing::{debug, info, instrument};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// An immutable decoded photo.
///
/// Cloning is cheap: the pixels are shared. Each new `SourceImage` gets a
/// fresh generation number so outputs can be traced back to their source.
#[derive(Debug, Clone)]
pub struct SourceImage {
    generation: u64,
    image: Arc<RgbaImage>,
}

impl SourceImage {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            image: Arc::new(image),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
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
}

/// Knobs applied while decoding a picked photo.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Longest allowed edge; `0` disables downsizing.
    pub max_dimension: u32,
    /// Honour the EXIF orientation tag, as camera photos expect.
    pub apply_exif_orientation: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_dimension: 2048,
            apply_exif_orientation: true,
        }
    }
}

impl From<&AppConfig> for DecodeOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_dimension: config.max_source_dimension,
            ..Self::default()
        }
    }
}

/// Decode encoded photo bytes (JPEG, PNG, WebP, ...) into a `SourceImage`.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_photo(data: &[u8], options: &DecodeOptions) -> Result<SourceImage> {
    if data.is_empty() {
        return Err(InstafilterError::DecodeFailed("photo data is empty".into()));
    }

    let mut image = image::load_from_memory(data).map_err(|err| {
        InstafilterError::DecodeFailed(format!("failed to decode photo: {}", err))
    })?;

    if options.apply_exif_orientation {
        let orientation = read_exif_orientation(data);
        if orientation != 1 {
            debug!(orientation, "Applying EXIF orientation");
            image = apply_orientation(image, orientation);
        }
    }

    let image = downsize(image, options.max_dimension);
    info!(
        width = image.width(),
        height = image.height(),
        "Photo decoded"
    );
    Ok(SourceImage::new(image.to_rgba8()))
}

/// Read the EXIF orientation tag (0x0112). Returns 1 when absent.
pub fn read_exif_orientation(data: &[u8]) -> u32 {
    let mut cursor = Cursor::new(data);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
        return 1;
    };
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(1)
}

/// Rotate/flip an image so that EXIF orientation `orientation` reads upright.
///
/// 1 = normal, 2 = mirrored, 3 = 180, 4 = flipped vertically,
/// 5 = mirrored + 90 CW, 6 = 90 CW, 7 = mirrored + 270 CW, 8 = 270 CW.
pub fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

/// Shrink so the longest edge is at most `max_dimension`, keeping aspect ratio.
fn downsize(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    if max_dimension == 0 || image.width().max(image.height()) <= max_dimension {
        return image;
    }
    debug!(
        from_w = image.width(),
        from_h = image.height(),
        max_dimension,
        "Downsizing photo"
    );
    image.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .expect("encode test png");
        buffer
    }

    #[test]
    fn decodes_png() {
        let source = decode_photo(&png_bytes(12, 8), &DecodeOptions::default()).unwrap();
        assert_eq!((source.width(), source.height()), (12, 8));
        assert_eq!(source.image().get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn empty_bytes_fail_to_decode() {
        let err = decode_photo(&[], &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, InstafilterError::DecodeFailed(_)));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_photo(b"definitely not a photo", &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, InstafilterError::DecodeFailed(_)));
    }

    #[test]
    fn large_photos_are_downsized_preserving_aspect() {
        let options = DecodeOptions {
            max_dimension: 50,
            ..DecodeOptions::default()
        };
        let source = decode_photo(&png_bytes(200, 100), &options).unwrap();
        assert_eq!((source.width(), source.height()), (50, 25));
    }

    #[test]
    fn zero_max_dimension_keeps_size() {
        let options = DecodeOptions {
            max_dimension: 0,
            ..DecodeOptions::default()
        };
        let source = decode_photo(&png_bytes(64, 16), &options).unwrap();
        assert_eq!((source.width(), source.height()), (64, 16));
    }

    /// Baseline JPEG with an APP1 EXIF segment carrying `orientation`,
    /// inserted right after SOI.
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u8) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .write_with_encoder(image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 90))
            .expect("encode test jpeg");

        // "Exif\0\0", big-endian TIFF header, one IFD entry (0x0112 SHORT).
        let mut payload = b"Exif\0\0MM\0\x2a\0\0\0\x08".to_vec();
        payload.extend_from_slice(&[0x00, 0x01]);
        payload.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        payload.extend_from_slice(&[0x00, orientation, 0x00, 0x00]);
        payload.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let length = (payload.len() + 2) as u16;
        let mut segment = vec![0xFF, 0xE1];
        segment.extend_from_slice(&length.to_be_bytes());
        segment.extend_from_slice(&payload);

        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        let mut tagged = jpeg[..2].to_vec();
        tagged.extend_from_slice(&segment);
        tagged.extend_from_slice(&jpeg[2..]);
        tagged
    }

    #[test]
    fn exif_orientation_is_read_from_jpeg() {
        assert_eq!(read_exif_orientation(&jpeg_with_orientation(4, 2, 6)), 6);
        assert_eq!(read_exif_orientation(&jpeg_with_orientation(4, 2, 1)), 1);
    }

    #[test]
    fn decode_rotates_by_exif_orientation() {
        let data = jpeg_with_orientation(16, 8, 6);
        let source = decode_photo(&data, &DecodeOptions::default()).unwrap();
        assert_eq!((source.width(), source.height()), (8, 16));

        let raw = DecodeOptions {
            apply_exif_orientation: false,
            ..DecodeOptions::default()
        };
        let source = decode_photo(&data, &raw).unwrap();
        assert_eq!((source.width(), source.height()), (16, 8));
    }

    #[test]
    fn png_without_exif_is_upright() {
        assert_eq!(read_exif_orientation(&png_bytes(4, 4)), 1);
    }

    /// Orientation 6 (rotate 90 CW) swaps width and height.
    #[test]
    fn orientation_six_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 2));
        let rotated = apply_orientation(img, 6);
        assert_eq!((rotated.width(), rotated.height()), (2, 4));
    }

    #[test]
    fn mirrored_orientation_flips_pixels() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let flipped = apply_orientation(DynamicImage::ImageRgba8(img), 2).to_rgba8();
        assert_eq!(flipped.get_pixel(1, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn generations_are_unique() {
        let a = SourceImage::new(RgbaImage::new(1, 1));
        let b = SourceImage::new(RgbaImage::new(1, 1));
        assert_ne!(a.generation(), b.generation());
        assert_eq!(a.clone().generation(), a.generation());
    }
}
