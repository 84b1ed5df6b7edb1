// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the host services the app uses.

use instafilter_core::error::Result;

/// Unified bridge that groups all native capabilities.
///
/// `Send + Sync` so one bridge can be shared between the UI thread (which
/// presents pickers) and the worker that transfers photo bytes.
pub trait PlatformBridge: NativePhotoPicker + NativeShare + NativeReviewPrompt + Send + Sync {
    /// Human-readable platform name (e.g. "Desktop", "iOS 17").
    fn platform_name(&self) -> &str;
}

/// Reference to a photo chosen by the user, resolvable to bytes later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef {
    /// Platform identifier: a file path on desktop, an asset id on mobile.
    pub id: String,
    /// File name or title to show, if the platform provides one.
    pub display_name: Option<String>,
}

/// Choose photos from the user's library.
pub trait NativePhotoPicker {
    /// Present the picker. Returns `Ok(None)` if the user cancelled.
    fn pick_photo(&self) -> Result<Option<PhotoRef>>;

    /// Transfer the encoded bytes of a previously picked photo.
    ///
    /// May block (network-backed libraries); call off the UI thread.
    fn load_photo(&self, photo: &PhotoRef) -> Result<Vec<u8>>;
}

/// Hand content to the OS share surface.
pub trait NativeShare {
    /// Share an encoded image with other apps.
    fn share_image(&self, data: &[u8], mime_type: &str, suggested_name: &str) -> Result<()>;
}

/// Ask the platform to show its app-rating prompt.
pub trait NativeReviewPrompt {
    /// The platform may decide not to show anything.
    fn request_review(&self) -> Result<()>;
}
