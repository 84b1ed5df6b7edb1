// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge — native file dialogs stand in for the photo library and the
// share sheet.
//
// Dialogs must be presented from the UI thread; `load_photo` only reads the
// file and is safe to call from a worker.

use std::path::Path;

use instafilter_core::error::{InstafilterError, Result};
use tracing::{info, instrument};

use crate::traits::*;

/// Extensions offered in the "open photo" dialog.
const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff"];

/// Bridge for Linux, macOS, and Windows desktops.
#[derive(Debug, Default)]
pub struct DesktopBridge;

impl DesktopBridge {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativePhotoPicker for DesktopBridge {
    fn pick_photo(&self) -> Result<Option<PhotoRef>> {
        let picked = rfd::FileDialog::new()
            .set_title("Choose a photo")
            .add_filter("Photos", PHOTO_EXTENSIONS)
            .pick_file();
        Ok(picked.map(|path| photo_ref_for(&path)))
    }

    #[instrument(skip(self), fields(id = %photo.id))]
    fn load_photo(&self, photo: &PhotoRef) -> Result<Vec<u8>> {
        let data = std::fs::read(&photo.id).map_err(|err| {
            InstafilterError::PhotoTransfer(format!("failed to read {}: {}", photo.id, err))
        })?;
        info!(bytes = data.len(), "Photo transferred");
        Ok(data)
    }
}

impl NativeShare for DesktopBridge {
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    fn share_image(&self, data: &[u8], mime_type: &str, suggested_name: &str) -> Result<()> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save filtered photo")
            .set_file_name(suggested_name)
            .save_file()
        else {
            info!("Share cancelled");
            return Ok(());
        };
        std::fs::write(&path, data).map_err(|err| {
            InstafilterError::Bridge(format!("failed to save {}: {}", path.display(), err))
        })?;
        info!(path = %path.display(), mime_type, "Filtered photo saved");
        Ok(())
    }
}

impl NativeReviewPrompt for DesktopBridge {
    fn request_review(&self) -> Result<()> {
        info!("Showing review prompt");
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title("Enjoying Instafilter?")
            .set_description("If you like the app, please take a moment to rate it.")
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
        Ok(())
    }
}

fn photo_ref_for(path: &Path) -> PhotoRef {
    PhotoRef {
        id: path.to_string_lossy().into_owned(),
        display_name: path.file_name().map(|name| name.to_string_lossy().into_owned()),
    }
}
