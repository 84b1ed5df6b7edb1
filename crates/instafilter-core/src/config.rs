// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_REVIEW_THRESHOLD, FilterKind};

/// Encoding used when handing the filtered photo to the share surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareFormat {
    Png,
    Jpeg,
}

impl ShareFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Filter active when the app launches.
    pub initial_filter: FilterKind,
    /// Slider position when the app launches (0.0..=1.0).
    pub initial_intensity: f32,
    /// Filter changes before the store-review prompt is requested.
    pub review_threshold: u32,
    /// Longest edge of a decoded photo; larger photos are downsized.
    pub max_source_dimension: u32,
    /// Largest output extent (in pixels) the rasterizer will render.
    pub max_output_pixels: u64,
    /// Encoding used for shared images.
    pub share_format: ShareFormat,
    /// JPEG quality (1-100) when `share_format` is JPEG.
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_filter: FilterKind::SepiaTone,
            initial_intensity: 0.5,
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
            max_source_dimension: 2048,
            max_output_pixels: 64_000_000,
            share_format: ShareFormat::Png,
            jpeg_quality: 90,
        }
    }
}
