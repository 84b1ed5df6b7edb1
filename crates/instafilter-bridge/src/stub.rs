// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for builds where no native implementation is wired in.
//
// Every trait method returns `PlatformUnavailable`.

use instafilter_core::error::{InstafilterError, Result};

use crate::traits::*;

/// No-op bridge.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Unsupported (stub)"
    }
}

impl NativePhotoPicker for StubBridge {
    fn pick_photo(&self) -> Result<Option<PhotoRef>> {
        tracing::warn!("NativePhotoPicker::pick_photo called on stub bridge");
        Err(InstafilterError::PlatformUnavailable)
    }

    fn load_photo(&self, _photo: &PhotoRef) -> Result<Vec<u8>> {
        Err(InstafilterError::PlatformUnavailable)
    }
}

impl NativeShare for StubBridge {
    fn share_image(&self, _data: &[u8], _mime_type: &str, _suggested_name: &str) -> Result<()> {
        tracing::warn!("NativeShare::share_image called on stub bridge");
        Err(InstafilterError::PlatformUnavailable)
    }
}

impl NativeReviewPrompt for StubBridge {
    fn request_review(&self) -> Result<()> {
        tracing::warn!("NativeReviewPrompt::request_review called on stub bridge");
        Err(InstafilterError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_capability_is_unavailable() {
        let bridge = StubBridge;
        assert!(matches!(
            bridge.pick_photo(),
            Err(InstafilterError::PlatformUnavailable)
        ));
        let photo = PhotoRef {
            id: "asset-1".into(),
            display_name: None,
        };
        assert!(bridge.load_photo(&photo).is_err());
        assert!(bridge.share_image(b"png", "image/png", "a.png").is_err());
        assert!(bridge.request_review().is_err());
    }
}
