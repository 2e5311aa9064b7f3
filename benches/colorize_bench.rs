use criterion::{Criterion, criterion_group, criterion_main};
use fitscolor::image::{PaletteMode, PixelBuffer, ViewWindow, colorize, colorize_into};
use fitscolor::render::{RasterSink, RenderConfig, RenderJob, Renderer, WriteError};
use fitscolor::types::{BandingFactor, FloatImage};
use std::hint::black_box;

/// Synthetic 2048x2048 exposure: smooth gradient plus a few hot spots
fn synthetic_frame() -> FloatImage {
    let size = 2048;
    let samples = (0..size * size)
        .map(|i| {
            let (x, y) = ((i % size) as f32, (i / size) as f32);
            let hot = if i % 9973 == 0 { 5000.0 } else { 0.0 };
            (x * 0.37 + y * 0.11).sin() * 100.0 + x * 0.05 + hot
        })
        .collect();
    FloatImage::new(size, size, samples).unwrap()
}

/// Discards every render so only colorization is measured
struct NullSink;

impl RasterSink for NullSink {
    fn write(&self, _job: &RenderJob, pixels: &PixelBuffer) -> Result<(), WriteError> {
        black_box(pixels);
        Ok(())
    }
}

// ============================================================================
// TIER 1: FAN-OUT BENCHMARKS (Primary Baseline)
// ============================================================================

/// Full default plan (6 factors x 5 palettes) for one frame
fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    group.sample_size(10);

    let frame = synthetic_frame();
    let renderer = Renderer::new(RenderConfig::default()).unwrap();

    group.bench_function("default_plan_2048", |b| {
        b.iter(|| black_box(renderer.render_frame(black_box(&frame), &NullSink)));
    });

    group.finish();
}

// ============================================================================
// TIER 2: COMPONENT-LEVEL BENCHMARKS (Diagnostic)
// ============================================================================

/// Window scan alone
fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_window");
    let frame = synthetic_frame();

    group.bench_function("full_2048", |b| {
        b.iter(|| ViewWindow::full(black_box(frame.samples())).unwrap());
    });

    group.finish();
}

/// Single palette over a whole frame, fresh vs reused buffer
fn bench_colorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorize");

    let frame = synthetic_frame();
    let window = ViewWindow::full(frame.samples()).unwrap();
    let factor = BandingFactor::new(20.0).unwrap();

    for mode in PaletteMode::ALL {
        group.bench_function(mode.name(), |b| {
            b.iter(|| colorize(black_box(&frame), mode, &window, factor));
        });
    }

    let mut buffer = PixelBuffer::new(frame.dimensions());
    group.bench_function("roygbiv_reused_buffer", |b| {
        b.iter(|| {
            colorize_into(&mut buffer, black_box(&frame), PaletteMode::RoyGBiv, &window, factor);
            black_box(&buffer);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render_frame, bench_window, bench_colorize);
criterion_main!(benches);
