// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the instafilter-image crate. Runs every filter
// through the full pipeline (parameter mapping, filter, rasterize) at the
// default slider position on a synthetic photo-sized gradient.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use instafilter_core::FilterKind;
use instafilter_image::{FilterPipeline, SourceImage};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// One recompute per filter on a 640x480 gradient at intensity 0.5.
///
/// The source is shared across iterations (cheap `Arc` clone), so the
/// measurement covers the filter and rasterizer only.
fn bench_recompute(c: &mut Criterion) {
    let (width, height) = (640u32, 480u32);
    let source = SourceImage::new(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }));

    let mut group = c.benchmark_group("recompute (640x480)");
    group.sample_size(10);
    for filter in FilterKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(filter), &filter, |b, &filter| {
            let mut pipeline = FilterPipeline::new(filter, 0.5);
            pipeline.set_source(black_box(source.clone()));
            b.iter(|| {
                black_box(pipeline.recompute().map(|output| output.width()));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_recompute);
criterion_main!(benches);
