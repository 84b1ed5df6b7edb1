// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo loading — transfers the picked photo and decodes it off the UI thread.
//
// The result comes back as a `SessionEvent` so the session applies it in the
// same order as every other input.

use std::sync::Arc;

use instafilter_bridge::traits::{NativePhotoPicker, PhotoRef, PlatformBridge};
use instafilter_core::InstafilterError;
use instafilter_image::{DecodeOptions, decode_photo};
use tracing::instrument;

use super::session::SessionEvent;

/// Transfer and decode `photo` on the blocking pool.
#[instrument(skip(bridge, photo, options), fields(photo = %photo.id))]
pub async fn load_photo(
    bridge: Arc<dyn PlatformBridge>,
    photo: PhotoRef,
    options: DecodeOptions,
) -> SessionEvent {
    let result = tokio::task::spawn_blocking(move || {
        let data = bridge.load_photo(&photo)?;
        decode_photo(&data, &options)
    })
    .await
    .unwrap_or_else(|e| {
        Err(InstafilterError::PhotoTransfer(format!(
            "photo load task failed: {e}"
        )))
    });
    SessionEvent::PhotoLoaded(result)
}
