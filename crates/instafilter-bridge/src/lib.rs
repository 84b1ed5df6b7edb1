// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Instafilter — Platform bridge abstractions.
//
// The photo source, the share surface, and the store-review prompt are host
// services. This crate defines the traits the app talks to and picks an
// implementation for the target platform.

pub mod traits;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

pub mod stub;

use std::sync::Arc;

/// Returns the bridge implementation for the target operating system.
///
/// Desktop builds use native file dialogs via `rfd`. Mobile builds get the
/// stub until the host shell supplies its own bridge.
pub fn platform_bridge() -> Arc<dyn traits::PlatformBridge> {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Arc::new(desktop::DesktopBridge::new())
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        Arc::new(stub::StubBridge)
    }
}
