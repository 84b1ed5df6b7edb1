// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter pipeline — owns the current photo, filter, and intensity, and turns
// them into a processed output.

use instafilter_core::error::{InstafilterError, Result};
use instafilter_core::{AppConfig, FilterKind, FilterParameters};
use tracing::{debug, info, instrument, warn};

use crate::decode::SourceImage;
use crate::filters::{CpuFilterEngine, FilterEngine};
use crate::raster::{ProcessedOutput, Rasterizer};

/// The photo-filter pipeline.
///
/// Every input change (`set_source`, `select_filter`, `set_intensity`) is
/// expected to be followed by `recompute`. A failed recompute never surfaces
/// an error to the caller: it yields `None` and leaves the previous output
/// in place.
///
/// ```ignore
/// let mut pipeline = FilterPipeline::new(FilterKind::SepiaTone, 0.5);
/// pipeline.set_source(decode_photo(&bytes, &DecodeOptions::default())?);
/// let shown = pipeline.recompute();
/// ```
pub struct FilterPipeline<E = CpuFilterEngine> {
    engine: E,
    rasterizer: Rasterizer,
    source: Option<SourceImage>,
    filter: FilterKind,
    intensity: f32,
    last_parameters: Option<FilterParameters>,
    output: Option<ProcessedOutput>,
}

impl FilterPipeline<CpuFilterEngine> {
    /// Pipeline on the CPU engine with no photo loaded yet.
    pub fn new(filter: FilterKind, intensity: f32) -> Self {
        Self::with_engine(CpuFilterEngine, Rasterizer::default(), filter, intensity)
    }

    /// Pipeline seeded from the persisted launch settings.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_engine(
            CpuFilterEngine,
            Rasterizer::from(config),
            config.initial_filter,
            config.initial_intensity,
        )
    }
}

impl<E: FilterEngine> FilterPipeline<E> {
    pub fn with_engine(engine: E, rasterizer: Rasterizer, filter: FilterKind, intensity: f32) -> Self {
        Self {
            engine,
            rasterizer,
            source: None,
            filter,
            intensity: sanitize_intensity(intensity).unwrap_or(0.0),
            last_parameters: None,
            output: None,
        }
    }

    // -- Inputs ---------------------------------------------------------------

    /// Replace the photo. The previous output no longer applies and is dropped.
    pub fn set_source(&mut self, source: SourceImage) {
        info!(
            generation = source.generation(),
            width = source.width(),
            height = source.height(),
            "Source photo replaced"
        );
        self.source = Some(source);
        self.output = None;
    }

    /// Forget the photo and any output derived from it.
    pub fn clear_source(&mut self) {
        self.source = None;
        self.output = None;
    }

    /// Switch filters. Parameters are re-derived for the new filter on the
    /// next recompute; nothing carries over from the old one.
    pub fn select_filter(&mut self, filter: FilterKind) {
        info!(from = %self.filter, to = %filter, "Filter selected");
        self.filter = filter;
        self.last_parameters = None;
        self.output = None;
    }

    /// Move the intensity slider. Clamped to 0.0..=1.0; NaN is ignored.
    pub fn set_intensity(&mut self, value: f32) {
        match sanitize_intensity(value) {
            Some(intensity) => self.intensity = intensity,
            None => warn!("Ignoring NaN intensity"),
        }
    }

    // -- Processing -----------------------------------------------------------

    /// Run one pass. Returns the new output, or `None` if nothing could be
    /// produced (in which case the previous output, if any, is kept).
    pub fn recompute(&mut self) -> Option<&ProcessedOutput> {
        match self.try_recompute() {
            Ok(output) => Some(output),
            Err(err) if err.is_pipeline_failure() => {
                debug!(error = %err, "Recompute produced no output");
                None
            }
            Err(err) => {
                warn!(error = %err, "Recompute failed unexpectedly");
                None
            }
        }
    }

    /// Same pass as [`recompute`](Self::recompute), reporting why it failed.
    #[instrument(skip(self), fields(filter = %self.filter, intensity = self.intensity))]
    pub fn try_recompute(&mut self) -> Result<&ProcessedOutput> {
        let source = self
            .source
            .as_ref()
            .ok_or(InstafilterError::NoSourceSelected)?;

        let parameters = FilterParameters::for_filter(self.filter, self.intensity);
        self.last_parameters = Some(parameters);

        let filtered = self
            .engine
            .apply(self.filter, &parameters, source)
            .ok_or(InstafilterError::FilterProducedNoOutput(self.filter))?;
        let extent = filtered.extent;
        let image = self.rasterizer.render(filtered)?;

        debug!(width = image.width(), height = image.height(), "Output replaced");
        let output = ProcessedOutput::new(
            image,
            extent,
            self.filter,
            parameters,
            source.generation(),
        );
        Ok(self.output.insert(output))
    }

    // -- Accessors ------------------------------------------------------------

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn active_filter(&self) -> FilterKind {
        self.filter
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Parameters derived by the most recent recompute for the active filter.
    pub fn last_parameters(&self) -> Option<&FilterParameters> {
        self.last_parameters.as_ref()
    }

    pub fn output(&self) -> Option<&ProcessedOutput> {
        self.output.as_ref()
    }
}

fn sanitize_intensity(value: f32) -> Option<f32> {
    (!value.is_nan()).then(|| value.clamp(0.0, 1.0))
}
