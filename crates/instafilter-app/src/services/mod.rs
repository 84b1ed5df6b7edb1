// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — bridges the Dioxus UI to the instafilter backend crates.
//
// The session owns the filter pipeline; everything that touches the disk or
// the platform (settings, usage count, photo transfer, share, review) goes
// through `AppServices` or the photo loader.

pub mod app_services;
pub mod data_dir;
pub mod photo_loader;
pub mod session;
