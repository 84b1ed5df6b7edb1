// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Instafilter — single-screen photo filter app
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::home::Home;
use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Instafilter starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(|| match AppServices::init() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "data directory unavailable, settings will not persist");
            AppServices::fallback()
        }
    });

    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::new(&svc)));

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; min-height: 100vh; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
            Home {}
        }
    }
}
