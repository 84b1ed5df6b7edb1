// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Instafilter.

use thiserror::Error;

use crate::types::FilterKind;

/// Top-level error type for all Instafilter operations.
#[derive(Debug, Error)]
pub enum InstafilterError {
    // -- Pipeline errors --
    #[error("no source image selected")]
    NoSourceSelected,

    #[error("image decoding failed: {0}")]
    DecodeFailed(String),

    #[error("{0} filter produced no output")]
    FilterProducedNoOutput(FilterKind),

    #[error("rasterization failed: {0}")]
    RasterizeFailed(String),

    // -- Photo source / export --
    #[error("photo transfer failed: {0}")]
    PhotoTransfer(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl InstafilterError {
    /// Whether this error belongs to the filter pipeline's silent-failure set.
    ///
    /// These never reach the user; the pipeline keeps its previous output.
    pub fn is_pipeline_failure(&self) -> bool {
        matches!(
            self,
            Self::NoSourceSelected
                | Self::DecodeFailed(_)
                | Self::FilterProducedNoOutput(_)
                | Self::RasterizeFailed(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, InstafilterError>;
