// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — owns the persisted settings and usage count and the
// platform bridge, and exposes them to the Dioxus UI.
//
// Two small JSON files live in the data directory: `config.json` (launch
// settings, written only when the user changes them) and `usage.json` (the
// filter-change count behind the review prompt).

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use instafilter_bridge::traits::{
    NativePhotoPicker, NativeReviewPrompt, NativeShare, PhotoRef, PlatformBridge,
};
use instafilter_core::error::Result;
use instafilter_core::{AppConfig, ShareFormat, UsageCounter};
use instafilter_image::{DecodeOptions, ProcessedOutput};
use tracing::{info, instrument, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";
const USAGE_FILE: &str = "usage.json";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
    bridge: Arc<dyn PlatformBridge>,
}

impl AppServices {
    /// Initialise services in the platform data directory. Call once at startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir()?;
        Ok(Self::with_parts(dir, instafilter_bridge::platform_bridge()))
    }

    /// Services backed by a throwaway directory, for when `init` fails.
    pub fn fallback() -> Self {
        Self::with_parts(data_dir::fallback_dir(), instafilter_bridge::platform_bridge())
    }

    /// Assemble services from an explicit directory and bridge.
    pub fn with_parts(data_dir: PathBuf, bridge: Arc<dyn PlatformBridge>) -> Self {
        let config = load_json::<AppConfig>(&data_dir, CONFIG_FILE).unwrap_or_default();
        info!(
            path = %data_dir.display(),
            platform = bridge.platform_name(),
            "app services initialised"
        );
        Self {
            data_dir,
            config: Arc::new(Mutex::new(config)),
            bridge,
        }
    }

    pub fn bridge(&self) -> Arc<dyn PlatformBridge> {
        Arc::clone(&self.bridge)
    }

    // -- Config Persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().expect("config lock poisoned") = config.clone();
        persist_json(&self.data_dir, CONFIG_FILE, config)
    }

    /// Decoder settings derived from the current config.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::from(&self.config())
    }

    // -- Usage Counter -------------------------------------------------------

    /// Load the persisted usage count, starting from zero when absent or
    /// unreadable.
    pub fn load_usage(&self) -> UsageCounter {
        load_json(&self.data_dir, USAGE_FILE).unwrap_or_default()
    }

    pub fn save_usage(&self, usage: &UsageCounter) -> Result<()> {
        persist_json(&self.data_dir, USAGE_FILE, usage)
    }

    // -- Platform Services ---------------------------------------------------

    /// Ask the platform for a photo. `Ok(None)` means the user cancelled.
    pub fn pick_photo(&self) -> Result<Option<PhotoRef>> {
        self.bridge.pick_photo()
    }

    /// Encode the output in the configured share format and hand it to the
    /// platform share surface.
    #[instrument(skip(self, output), fields(filter = %output.filter()))]
    pub fn share_output(&self, output: &ProcessedOutput) -> Result<()> {
        let config = self.config();
        let data = match config.share_format {
            ShareFormat::Png => output.to_png_bytes()?,
            ShareFormat::Jpeg => output.to_jpeg_bytes(config.jpeg_quality)?,
        };
        let name = format!("instafilter.{}", config.share_format.extension());
        info!(bytes = data.len(), name = %name, "Sharing filtered photo");
        self.bridge
            .share_image(&data, config.share_format.mime_type(), &name)
    }

    /// Show the store-review prompt. Failures are logged and dropped.
    pub fn request_review(&self) {
        if let Err(e) = self.bridge.request_review() {
            warn!(error = %e, "review prompt unavailable");
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_json<T: serde::de::DeserializeOwned>(data_dir: &Path, file: &str) -> Option<T> {
    let path = data_dir.join(file);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            None
        }
    }
}

fn persist_json<T: serde::Serialize>(data_dir: &Path, file: &str, value: &T) -> Result<()> {
    let path = data_dir.join(file);
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, json)?;
    Ok(())
}
