// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page — the single editing screen: photo, intensity slider, filter
// chooser, share, and the share format setting.

use dioxus::prelude::*;

use instafilter_core::{FilterKind, ShareFormat};

use crate::services::app_services::AppServices;
use crate::services::photo_loader::load_photo;
use crate::services::session::SessionEvent;
use crate::state::AppState;

#[component]
pub fn Home() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut choosing_filter = use_signal(|| false);
    let mut share_format = use_signal({
        let svc = svc.clone();
        move || svc.config().share_format
    });
    let share_format_now = share_format();

    let (preview_url, loading, photo_name, intensity, active_filter, has_output) = {
        let s = state.read();
        (
            s.preview_url.clone(),
            s.loading,
            s.photo_name.clone(),
            s.session.pipeline().intensity(),
            s.session.pipeline().active_filter(),
            s.output().is_some(),
        )
    };

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 16px;",
            h1 { "Instafilter" }

            // Photo area: tap to pick
            div {
                style: "min-height: 320px; border-radius: 8px; background: #eee; display: flex; align-items: center; justify-content: center; cursor: pointer; overflow: hidden;",
                onclick: {
                    let svc = svc.clone();
                    move |_| match svc.pick_photo() {
                        Ok(Some(photo)) => {
                            tracing::info!(photo = %photo.id, "Photo picked");
                            let ticket = state.write().begin_photo_load(photo.display_name.clone());
                            let bridge = svc.bridge();
                            let options = svc.decode_options();
                            let svc = svc.clone();
                            spawn(async move {
                                let event = load_photo(bridge, photo, options).await;
                                state.write().finish_photo_load(ticket, event, &svc);
                            });
                        }
                        Ok(None) => tracing::debug!("Photo pick cancelled"),
                        Err(e) => tracing::warn!(error = %e, "photo picker unavailable"),
                    }
                },
                if let Some(url) = preview_url {
                    img { src: "{url}", style: "max-width: 100%; max-height: 60vh; object-fit: contain;" }
                } else if loading {
                    span { style: "color: #666;", "Loading..." }
                } else {
                    span { style: "color: #666; font-size: 18px;", "Tap to select a picture" }
                }
            }

            if let Some(name) = photo_name {
                p { style: "color: #888; font-size: 13px; margin: 0;", "{name}" }
            }

            // Intensity slider
            div { style: "display: flex; align-items: center; gap: 12px;",
                label { style: "min-width: 72px;", "Intensity" }
                input {
                    r#type: "range",
                    min: "0",
                    max: "1",
                    step: "0.01",
                    value: "{intensity}",
                    style: "flex: 1;",
                    oninput: {
                        let svc = svc.clone();
                        move |evt: FormEvent| {
                            if let Ok(value) = evt.value().parse::<f32>() {
                                state.write().dispatch(SessionEvent::IntensityChanged(value), &svc);
                            }
                        }
                    },
                }
            }

            // Actions
            div { style: "display: flex; justify-content: space-between; gap: 12px;",
                button {
                    style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 16px;",
                    onclick: move |_| choosing_filter.set(true),
                    "{active_filter}"
                }
                button {
                    style: "flex: 1; padding: 12px; border-radius: 8px; border: none; color: white; background: #007aff; font-size: 16px;",
                    disabled: !has_output,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let output = state.read().share_snapshot();
                            if let Some(output) = output {
                                if let Err(e) = svc.share_output(&output) {
                                    tracing::warn!(error = %e, "share failed");
                                }
                            }
                        }
                    },
                    "Share"
                }
            }

            // Share format
            div { style: "display: flex; align-items: center; gap: 12px; color: #666; font-size: 14px;",
                span { "Share as" }
                for format in [ShareFormat::Png, ShareFormat::Jpeg] {
                    button {
                        key: "{format:?}",
                        style: format_button_style(format == share_format_now),
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let mut config = svc.config();
                                config.share_format = format;
                                if let Err(e) = svc.save_config(&config) {
                                    tracing::warn!(error = %e, "failed to save settings");
                                }
                                share_format.set(format);
                            }
                        },
                        {format_label(format)}
                    }
                }
            }

            if choosing_filter() {
                FilterChooser {
                    on_choose: {
                        let svc = svc.clone();
                        move |choice: Option<FilterKind>| {
                            choosing_filter.set(false);
                            if let Some(filter) = choice {
                                state.write().dispatch(SessionEvent::FilterSelected(filter), &svc);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn format_label(format: ShareFormat) -> &'static str {
    match format {
        ShareFormat::Png => "PNG",
        ShareFormat::Jpeg => "JPEG",
    }
}

fn format_button_style(selected: bool) -> &'static str {
    if selected {
        "padding: 6px 12px; border-radius: 6px; border: 1px solid #007aff; background: #007aff; color: white;"
    } else {
        "padding: 6px 12px; border-radius: 6px; border: 1px solid #ccc; background: white; color: #333;"
    }
}

/// "Select a filter" sheet. `None` means cancel.
#[component]
fn FilterChooser(on_choose: EventHandler<Option<FilterKind>>) -> Element {
    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 8px; padding: 16px; border-radius: 12px; background: #fafafa; border: 1px solid #e0e0e0;",
            h2 { style: "margin: 0 0 8px 0; font-size: 18px;", "Select a filter" }
            for filter in FilterKind::ALL {
                button {
                    key: "{filter}",
                    style: "padding: 10px; border-radius: 8px; border: 1px solid #ccc; background: white; font-size: 15px;",
                    onclick: move |_| on_choose.call(Some(filter)),
                    "{filter}"
                }
            }
            button {
                style: "padding: 10px; border-radius: 8px; border: none; background: transparent; color: #d00; font-size: 15px;",
                onclick: move |_| on_choose.call(None),
                "Cancel"
            }
        }
    }
}
