// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — the editor session plus what the screen shows.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use instafilter_image::ProcessedOutput;
use tracing::{debug, warn};

use crate::services::app_services::AppServices;
use crate::services::session::{EditorSession, SessionEvent, SessionUpdate};

/// Shared state accessible to the screen via `use_context`.
pub struct AppState {
    pub session: EditorSession,
    /// A photo transfer is in flight.
    pub loading: bool,
    /// Name of the photo on screen, when the platform provides one.
    pub photo_name: Option<String>,
    /// `data:` URL of the last output shown, ready for an `img` element.
    pub preview_url: Option<String>,
    /// Ticket of the newest photo load; older loads are discarded.
    load_ticket: u64,
    pending_name: Option<String>,
}

impl AppState {
    pub fn new(svc: &AppServices) -> Self {
        Self {
            session: EditorSession::new(&svc.config(), svc.load_usage()),
            loading: false,
            photo_name: None,
            preview_url: None,
            load_ticket: 0,
            pending_name: None,
        }
    }

    /// Record that a photo load has started and return its ticket. Any load
    /// started earlier is superseded.
    pub fn begin_photo_load(&mut self, photo_name: Option<String>) -> u64 {
        self.load_ticket += 1;
        self.loading = true;
        self.pending_name = photo_name;
        self.load_ticket
    }

    /// Apply the result of the load holding `ticket`. Results of superseded
    /// loads are dropped and `None` is returned.
    pub fn finish_photo_load(
        &mut self,
        ticket: u64,
        event: SessionEvent,
        svc: &AppServices,
    ) -> Option<SessionUpdate> {
        if ticket != self.load_ticket {
            debug!(ticket, latest = self.load_ticket, "Dropping superseded photo load");
            return None;
        }
        self.loading = false;
        let name = self.pending_name.take();
        let loaded = matches!(event, SessionEvent::PhotoLoaded(Ok(_)));
        let update = self.dispatch(event, svc);
        if loaded {
            self.photo_name = name;
        }
        Some(update)
    }

    /// Feed one event to the session and carry out the side effects it asks
    /// for: persisting the usage count, prompting for a review, and refreshing
    /// the preview. The preview only changes when a new output arrives.
    pub fn dispatch(&mut self, event: SessionEvent, svc: &AppServices) -> SessionUpdate {
        let update = self.session.handle(event);

        if update.usage_changed {
            if let Err(e) = svc.save_usage(self.session.usage()) {
                warn!(error = %e, "failed to persist usage count");
            }
        }
        if update.request_review {
            svc.request_review();
        }
        if update.output_changed {
            self.refresh_preview();
        }
        update
    }

    /// The output matching the current photo, filter, and intensity, if any.
    pub fn output(&self) -> Option<&ProcessedOutput> {
        self.session.pipeline().output()
    }

    /// Owned copy of the current output for the share surface, so nothing
    /// borrows the state while the platform dialog is open.
    pub fn share_snapshot(&self) -> Option<ProcessedOutput> {
        self.output().cloned()
    }

    fn refresh_preview(&mut self) {
        self.preview_url = match self.output().map(preview_data_url) {
            Some(Ok(url)) => Some(url),
            Some(Err(e)) => {
                warn!(error = %e, "failed to encode preview");
                None
            }
            None => None,
        };
    }
}

fn preview_data_url(output: &ProcessedOutput) -> instafilter_core::error::Result<String> {
    let png = output.to_png_bytes()?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use image::{Rgba, RgbaImage};
    use instafilter_core::{FilterKind, InstafilterError, UsageCounter};
    use instafilter_image::SourceImage;

    use crate::services::app_services::tests::services;

    fn photo() -> SourceImage {
        SourceImage::new(RgbaImage::from_pixel(6, 5, Rgba([120, 80, 40, 255])))
    }

    #[test]
    fn loaded_photo_gets_a_preview() {
        let tmp = tempfile::tempdir().unwrap();
        let (svc, _) = services(tmp.path());
        let mut state = AppState::new(&svc);

        let ticket = state.begin_photo_load(Some("beach.jpg".into()));
        assert!(state.loading);
        state
            .finish_photo_load(ticket, SessionEvent::PhotoLoaded(Ok(photo())), &svc)
            .expect("latest load applies");
        assert!(!state.loading);
        assert_eq!(state.photo_name.as_deref(), Some("beach.jpg"));
        let url = state.preview_url.as_deref().expect("preview");
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn superseded_load_finishing_last_is_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let (svc, _) = services(tmp.path());
        let mut state = AppState::new(&svc);

        let first = state.begin_photo_load(Some("first.jpg".into()));
        let second = state.begin_photo_load(Some("second.png".into()));

        let newer = photo();
        let newer_generation = newer.generation();
        state
            .finish_photo_load(second, SessionEvent::PhotoLoaded(Ok(newer)), &svc)
            .expect("latest load applies");
        assert!(state
            .finish_photo_load(first, SessionEvent::PhotoLoaded(Ok(photo())), &svc)
            .is_none());

        assert!(!state.loading);
        assert_eq!(state.photo_name.as_deref(), Some("second.png"));
        assert_eq!(
            state.output().map(|o| o.source_generation()),
            Some(newer_generation)
        );
    }

    #[test]
    fn failed_load_keeps_previous_name_and_preview() {
        let tmp = tempfile::tempdir().unwrap();
        let (svc, _) = services(tmp.path());
        let mut state = AppState::new(&svc);

        let ticket = state.begin_photo_load(Some("good.png".into()));
        state.finish_photo_load(ticket, SessionEvent::PhotoLoaded(Ok(photo())), &svc);
        let preview = state.preview_url.clone();

        let ticket = state.begin_photo_load(Some("broken.jpg".into()));
        state.finish_photo_load(
            ticket,
            SessionEvent::PhotoLoaded(Err(InstafilterError::DecodeFailed("truncated".into()))),
            &svc,
        );
        assert!(!state.loading);
        assert_eq!(state.photo_name.as_deref(), Some("good.png"));
        assert_eq!(state.preview_url, preview);
    }

    #[test]
    fn share_snapshot_outlives_later_edits() {
        let tmp = tempfile::tempdir().unwrap();
        let (svc, bridge) = services(tmp.path());
        let mut state = AppState::new(&svc);
        assert!(state.share_snapshot().is_none());

        state.dispatch(SessionEvent::PhotoLoaded(Ok(photo())), &svc);
        let snapshot = state.share_snapshot().expect("output to share");
        state.dispatch(SessionEvent::FilterSelected(FilterKind::Edges), &svc);

        assert_eq!(snapshot.filter(), FilterKind::SepiaTone);
        svc.share_output(&snapshot).unwrap();
        assert_eq!(bridge.shared.lock().unwrap().len(), 1);
    }

    #[test]
    fn failed_filter_change_keeps_last_preview() {
        let tmp = tempfile::tempdir().unwrap();
        let (svc, _) = services(tmp.path());
        let mut config = svc.config();
        config.max_output_pixels = 1_000;
        svc.save_config(&config).unwrap();
        let mut state = AppState::new(&svc);

        state.dispatch(SessionEvent::PhotoLoaded(Ok(photo())), &svc);
        let preview = state.preview_url.clone();
        assert!(preview.is_some());

        // Radius 100 grows the 6x5 photo far past the pixel budget.
        let update = state.dispatch(SessionEvent::FilterSelected(FilterKind::GaussianBlur), &svc);
        assert!(!update.output_changed);
        assert!(state.output().is_none());
        assert_eq!(state.preview_url, preview);
    }

    #[test]
    fn review_prompt_shown_once_and_usage_saved() {
        let tmp = tempfile::tempdir().unwrap();
        let (svc, bridge) = services(tmp.path());
        let mut state = AppState::new(&svc);
        state.dispatch(SessionEvent::PhotoLoaded(Ok(photo())), &svc);

        for i in 0..30 {
            let filter = FilterKind::ALL[i % FilterKind::ALL.len()];
            state.dispatch(SessionEvent::FilterSelected(filter), &svc);
        }
        assert_eq!(bridge.reviews.load(Ordering::SeqCst), 1);
        assert_eq!(
            svc.load_usage(),
            UsageCounter {
                filter_changes: 30,
                review_requested: true,
            }
        );

        // A restarted app does not prompt again.
        let mut restarted = AppState::new(&svc);
        restarted.dispatch(SessionEvent::FilterSelected(FilterKind::Edges), &svc);
        assert_eq!(bridge.reviews.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn intensity_change_without_photo_shows_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let (svc, _) = services(tmp.path());
        let mut state = AppState::new(&svc);
        let update = state.dispatch(SessionEvent::IntensityChanged(0.9), &svc);
        assert!(!update.output_changed);
        assert!(state.preview_url.is_none());
        assert_eq!(state.session.pipeline().intensity(), 0.9);
    }
}
