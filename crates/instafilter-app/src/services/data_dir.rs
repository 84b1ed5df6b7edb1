// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "instafilter";

/// Return the application data directory, creating it if needed.
///
/// On mobile the platform bridge should provide the app's sandbox directory
/// instead.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = app_dir_in(&base_dir());
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Scratch location used when the real data directory is not writable.
/// Nothing written here is expected to survive a restart.
pub fn fallback_dir() -> PathBuf {
    let dir = app_dir_in(&std::env::temp_dir());
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn app_dir_in(base: &Path) -> PathBuf {
    base.join(APP_DIR)
}

fn base_dir() -> PathBuf {
    // XDG first, then ~/.local/share
    if let Some(xdg) = std::env::var("XDG_DATA_HOME").ok().filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_dir_is_namespaced() {
        let dir = app_dir_in(Path::new("/data"));
        assert_eq!(dir, PathBuf::from("/data/instafilter"));
    }

    #[test]
    fn fallback_dir_exists() {
        let dir = fallback_dir();
        assert!(dir.ends_with(APP_DIR));
        assert!(dir.is_dir());
    }
}
