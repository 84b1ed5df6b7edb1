// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// instafilter-image — Image side of Instafilter.
//
// Provides photo decoding (format sniffing, EXIF orientation, downsizing), a
// CPU filter engine for the seven app filters, a rasterizer that turns a
// filter's output extent into a displayable bitmap, and the filter pipeline
// that maps the intensity slider onto filter parameters.

pub mod decode;
pub mod filters;
pub mod pipeline;
pub mod raster;

// Re-export the primary types so callers can use `instafilter_image::FilterPipeline` etc.
pub use decode::{DecodeOptions, SourceImage, decode_photo};
pub use filters::{CpuFilterEngine, FilterEngine, FilterOutput};
pub use pipeline::FilterPipeline;
pub use raster::{ProcessedOutput, Rasterizer};
