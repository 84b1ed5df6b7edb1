// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Instafilter.

use serde::{Deserialize, Serialize};

/// Multiplier applied to the intensity slider for radius parameters.
pub const RADIUS_PER_INTENSITY: f32 = 200.0;

/// Multiplier applied to the intensity slider for scale parameters.
pub const SCALE_PER_INTENSITY: f32 = 10.0;

/// Default number of filter changes before the review prompt is requested.
pub const DEFAULT_REVIEW_THRESHOLD: u32 = 20;

/// The parameter kinds the pipeline knows how to derive from the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Intensity,
    Radius,
    Scale,
}

impl ParameterKind {
    /// Map the normalized slider value onto this parameter's range.
    pub fn scale_from(self, intensity: f32) -> f32 {
        match self {
            Self::Intensity => intensity,
            Self::Radius => intensity * RADIUS_PER_INTENSITY,
            Self::Scale => intensity * SCALE_PER_INTENSITY,
        }
    }
}

/// The fixed set of filters offered by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    Crystallize,
    Edges,
    GaussianBlur,
    Pixellate,
    SepiaTone,
    UnsharpMask,
    Vignette,
}

impl FilterKind {
    /// Every filter, in the order the picker lists them.
    pub const ALL: [FilterKind; 7] = [
        Self::Crystallize,
        Self::Edges,
        Self::GaussianBlur,
        Self::Pixellate,
        Self::SepiaTone,
        Self::UnsharpMask,
        Self::Vignette,
    ];

    /// Parameters this filter accepts. A static property of the variant.
    pub fn accepted_parameters(self) -> &'static [ParameterKind] {
        match self {
            Self::Crystallize => &[ParameterKind::Radius],
            Self::Edges => &[ParameterKind::Intensity],
            Self::GaussianBlur => &[ParameterKind::Radius],
            Self::Pixellate => &[ParameterKind::Scale],
            Self::SepiaTone => &[ParameterKind::Intensity],
            Self::UnsharpMask => &[ParameterKind::Radius, ParameterKind::Intensity],
            Self::Vignette => &[ParameterKind::Radius, ParameterKind::Intensity],
        }
    }

    pub fn accepts(self, parameter: ParameterKind) -> bool {
        self.accepted_parameters().contains(&parameter)
    }

    /// Label shown in the filter picker.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Crystallize => "Crystallize",
            Self::Edges => "Edges",
            Self::GaussianBlur => "Gaussian Blur",
            Self::Pixellate => "Pixellate",
            Self::SepiaTone => "Sepia Tone",
            Self::UnsharpMask => "Unsharp Mask",
            Self::Vignette => "Vignette",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Concrete parameter values for one filter pass.
///
/// A field is `Some` only when the active filter accepts that parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParameters {
    pub intensity: Option<f32>,
    pub radius: Option<f32>,
    pub scale: Option<f32>,
}

impl FilterParameters {
    /// Derive the parameters for `filter` from a single slider value.
    ///
    /// Each accepted parameter is set independently from the same scalar;
    /// nothing is carried over from any earlier filter.
    pub fn for_filter(filter: FilterKind, intensity: f32) -> Self {
        let mut params = Self::default();
        for &kind in filter.accepted_parameters() {
            params.set(kind, kind.scale_from(intensity));
        }
        params
    }

    pub fn set(&mut self, kind: ParameterKind, value: f32) {
        let slot = match kind {
            ParameterKind::Intensity => &mut self.intensity,
            ParameterKind::Radius => &mut self.radius,
            ParameterKind::Scale => &mut self.scale,
        };
        *slot = Some(value);
    }

    /// True when every parameter that is set is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.intensity, self.radius, self.scale]
            .into_iter()
            .flatten()
            .all(f32::is_finite)
    }
}

/// Rectangular bounds of a filter result in source pixel coordinates.
///
/// The origin may be negative when a filter spreads beyond the source
/// (e.g. a blur's fall-off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Extent {
    /// Extent of an image of the given size anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Grow the extent by `amount` pixels on every side.
    pub fn outset(self, amount: u32) -> Self {
        Self {
            x: self.x - i64::from(amount),
            y: self.y - i64::from(amount),
            width: self.width.saturating_add(amount.saturating_mul(2)),
            height: self.height.saturating_add(amount.saturating_mul(2)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel count covered by the extent.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Persisted count of filter changes, used to time the store-review prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounter {
    /// Number of filter-selection actions across all sessions.
    pub filter_changes: u32,
    /// Whether the review prompt has already been requested.
    pub review_requested: bool,
}

impl UsageCounter {
    /// Count one filter change.
    ///
    /// Returns `true` exactly once: on the change that brings the count up to
    /// `threshold`, unless a prompt was already requested.
    pub fn record_filter_change(&mut self, threshold: u32) -> bool {
        self.filter_changes = self.filter_changes.saturating_add(1);
        if self.review_requested || self.filter_changes < threshold {
            return false;
        }
        self.review_requested = true;
        true
    }
}
