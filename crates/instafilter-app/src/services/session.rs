// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Editor session — the single-threaded driver behind the screen.
//
// UI actions and the photo-load task both arrive as `SessionEvent`s. Each
// event updates the pipeline and recomputes before the next one is handled,
// so there is never more than one filter pass in flight.

use instafilter_core::error::Result;
use instafilter_core::{AppConfig, FilterKind, UsageCounter};
use instafilter_image::{FilterPipeline, SourceImage};
use tracing::{debug, info, warn};

/// Inputs the session reacts to.
#[derive(Debug)]
pub enum SessionEvent {
    /// The photo-load task finished (successfully or not).
    PhotoLoaded(Result<SourceImage>),
    /// The user picked a filter from the list.
    FilterSelected(FilterKind),
    /// The intensity slider moved.
    IntensityChanged(f32),
}

/// What the caller has to act on after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    /// A new output was produced and should be shown.
    pub output_changed: bool,
    /// The usage counter changed and should be persisted.
    pub usage_changed: bool,
    /// The store-review prompt should be requested now.
    pub request_review: bool,
}

pub struct EditorSession {
    pipeline: FilterPipeline,
    usage: UsageCounter,
    review_threshold: u32,
}

impl EditorSession {
    /// Start a session from the launch settings and the persisted usage count.
    pub fn new(config: &AppConfig, usage: UsageCounter) -> Self {
        Self {
            pipeline: FilterPipeline::from_config(config),
            usage,
            review_threshold: config.review_threshold,
        }
    }

    pub fn handle(&mut self, event: SessionEvent) -> SessionUpdate {
        let mut update = SessionUpdate::default();
        match event {
            SessionEvent::PhotoLoaded(Ok(source)) => {
                self.pipeline.set_source(source);
                update.output_changed = self.pipeline.recompute().is_some();
            }
            SessionEvent::PhotoLoaded(Err(err)) => {
                // The previous photo and output stay on screen.
                warn!(error = %err, "Photo could not be loaded");
            }
            SessionEvent::FilterSelected(filter) => {
                self.pipeline.select_filter(filter);
                update.output_changed = self.pipeline.recompute().is_some();

                update.request_review = self.usage.record_filter_change(self.review_threshold);
                update.usage_changed = true;
                debug!(filter_changes = self.usage.filter_changes, "Filter change counted");
                if update.request_review {
                    info!(threshold = self.review_threshold, "Review threshold reached");
                }
            }
            SessionEvent::IntensityChanged(value) => {
                self.pipeline.set_intensity(value);
                update.output_changed = self.pipeline.recompute().is_some();
            }
        }
        update
    }

    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }

    pub fn usage(&self) -> &UsageCounter {
        &self.usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use instafilter_core::InstafilterError;

    fn photo() -> SourceImage {
        SourceImage::new(RgbaImage::from_fn(10, 8, |x, y| {
            Rgba([(x * 25) as u8, (y * 30) as u8, 60, 255])
        }))
    }

    fn session() -> EditorSession {
        EditorSession::new(&AppConfig::default(), UsageCounter::default())
    }

    #[test]
    fn loaded_photo_is_filtered_immediately() {
        let mut session = session();
        let update = session.handle(SessionEvent::PhotoLoaded(Ok(photo())));
        assert!(update.output_changed);
        assert!(!update.usage_changed);
        let output = session.pipeline().output().expect("output");
        assert_eq!(output.filter(), FilterKind::SepiaTone);
        assert_eq!(output.parameters().intensity, Some(0.5));
    }

    #[test]
    fn failed_load_keeps_previous_photo_and_output() {
        let mut session = session();
        let source = photo();
        let generation = source.generation();
        session.handle(SessionEvent::PhotoLoaded(Ok(source)));

        let update = session.handle(SessionEvent::PhotoLoaded(Err(
            InstafilterError::DecodeFailed("truncated".into()),
        )));
        assert_eq!(update, SessionUpdate::default());
        assert_eq!(
            session.pipeline().output().map(|o| o.source_generation()),
            Some(generation)
        );
    }

    #[test]
    fn filter_change_without_photo_still_counts() {
        let mut session = session();
        let update = session.handle(SessionEvent::FilterSelected(FilterKind::Edges));
        assert!(!update.output_changed);
        assert!(update.usage_changed);
        assert_eq!(session.usage().filter_changes, 1);
        assert!(session.pipeline().output().is_none());
    }

    #[test]
    fn filter_change_replays_loaded_photo() {
        let mut session = session();
        let source = photo();
        let generation = source.generation();
        session.handle(SessionEvent::PhotoLoaded(Ok(source)));

        let update = session.handle(SessionEvent::FilterSelected(FilterKind::Pixellate));
        assert!(update.output_changed);
        let output = session.pipeline().output().expect("output");
        assert_eq!(output.filter(), FilterKind::Pixellate);
        assert_eq!(output.source_generation(), generation);
        assert_eq!(output.parameters().scale, Some(5.0));
    }

    #[test]
    fn slider_recomputes_with_new_intensity() {
        let mut session = session();
        session.handle(SessionEvent::PhotoLoaded(Ok(photo())));
        let update = session.handle(SessionEvent::IntensityChanged(0.3));
        assert!(update.output_changed);
        assert_eq!(
            session.pipeline().output().and_then(|o| o.parameters().intensity),
            Some(0.3)
        );
    }

    #[test]
    fn review_requested_exactly_once_on_twentieth_change() {
        let mut session = session();
        session.handle(SessionEvent::PhotoLoaded(Ok(photo())));

        let mut prompts = Vec::new();
        for action in 1..=25 {
            let filter = FilterKind::ALL[action % FilterKind::ALL.len()];
            if session.handle(SessionEvent::FilterSelected(filter)).request_review {
                prompts.push(action);
            }
        }
        assert_eq!(prompts, vec![20]);
        assert!(session.usage().review_requested);
    }

    #[test]
    fn persisted_usage_carries_over() {
        let usage = UsageCounter {
            filter_changes: 19,
            review_requested: false,
        };
        let mut session = EditorSession::new(&AppConfig::default(), usage);
        let update = session.handle(SessionEvent::FilterSelected(FilterKind::Vignette));
        assert!(update.request_review);
    }
}
