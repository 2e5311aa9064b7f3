//! Render fan-out
//!
//! A [`Renderer`] owns a worker pool and renders every job of a
//! [`RenderPlan`] for one frame at a time. Work is split per banding factor:
//! each factor is one task that renders all palette modes in turn into a
//! single reused buffer, handing every finished buffer straight to the
//! [`RasterSink`]. At most one buffer per running task is alive.

mod error;
mod plan;

pub use error::{RenderError, WriteError};
pub use plan::{DEFAULT_FACTORS, RenderJob, RenderPlan};

use crate::image::{PixelBuffer, ViewWindow, colorize_into};
use crate::types::FloatImage;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Destination for finished renders
///
/// Shared by every worker, so implementations must be `Sync`.
pub trait RasterSink: Sync {
    /// Persist one finished render
    ///
    /// # Errors
    ///
    /// Returns a `WriteError` if the render could not be stored; the
    /// scheduler records it and carries on with the other jobs
    fn write(&self, job: &RenderJob, pixels: &PixelBuffer) -> Result<(), WriteError>;
}

/// Result of one job, reported individually
#[derive(Debug)]
pub struct JobOutcome {
    pub job: RenderJob,
    pub result: Result<(), WriteError>,
}

impl JobOutcome {
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub plan: RenderPlan,
    /// Fraction of the data range where the view window starts
    pub window_start: f64,
    /// Fraction of the data range where the view window ends
    pub window_end: f64,
    /// Worker count; `None` uses one per CPU
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            plan: RenderPlan::default(),
            window_start: 0.0,
            window_end: 1.0,
            threads: None,
        }
    }
}

/// Fan-out scheduler for render jobs
#[derive(Debug)]
pub struct Renderer {
    config: RenderConfig,
    pool: rayon::ThreadPool,
}

impl Renderer {
    /// Start the worker pool
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InvalidWindow` for non-finite window bounds or
    /// `RenderError::ThreadPool` if the workers cannot be spawned
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        if !config.window_start.is_finite() || !config.window_end.is_finite() {
            return Err(RenderError::InvalidWindow {
                start: config.window_start,
                end: config.window_end,
            });
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads.unwrap_or(0))
            .thread_name(|idx| format!("render-{idx}"))
            .build()?;

        debug!(
            threads = pool.current_num_threads(),
            jobs_per_frame = config.plan.job_count(),
            "Renderer ready"
        );

        Ok(Self { config, pool })
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[must_use]
    pub fn plan(&self) -> &RenderPlan {
        &self.config.plan
    }

    /// Render every job of the plan for one frame
    ///
    /// An empty frame produces no jobs. Outcomes come back grouped by
    /// banding factor; a failed job never stops the others.
    pub fn render_frame<S: RasterSink>(&self, image: &FloatImage, sink: &S) -> Vec<JobOutcome> {
        let Ok(window) =
            ViewWindow::compute(image.samples(), self.config.window_start, self.config.window_end)
        else {
            debug!(dimensions = %image.dimensions(), "Skipping empty frame");
            return Vec::new();
        };

        debug!(min = window.min, max = window.max, span = window.span, "View window");

        let plan = &self.config.plan;
        self.pool.install(|| {
            plan.factors()
                .par_iter()
                .flat_map_iter(|&factor| {
                    let mut buffer = PixelBuffer::new(image.dimensions());
                    let mut outcomes = Vec::with_capacity(plan.modes().len());

                    for &mode in plan.modes() {
                        let job = RenderJob::new(factor, mode);
                        colorize_into(&mut buffer, image, mode, &window, factor);

                        let result = sink.write(&job, &buffer);
                        match &result {
                            Ok(()) => debug!(%job, "Rendered"),
                            Err(e) => warn!(%job, error = %e, "Render job failed"),
                        }
                        outcomes.push(JobOutcome { job, result });
                    }

                    outcomes
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{PaletteMode, colorize, pack};
    use crate::types::BandingFactor;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Keeps a copy of every render it receives
    #[derive(Default)]
    struct CollectingSink {
        renders: Mutex<Vec<(RenderJob, PixelBuffer)>>,
    }

    impl RasterSink for CollectingSink {
        fn write(&self, job: &RenderJob, pixels: &PixelBuffer) -> Result<(), WriteError> {
            self.renders.lock().unwrap().push((*job, pixels.clone()));
            Ok(())
        }
    }

    /// Fails every binary render, accepts the rest
    #[derive(Default)]
    struct FailingBinarySink {
        written: AtomicUsize,
    }

    impl RasterSink for FailingBinarySink {
        fn write(&self, job: &RenderJob, pixels: &PixelBuffer) -> Result<(), WriteError> {
            if job.mode == PaletteMode::Binary {
                return Err(WriteError::BufferSize {
                    actual: pixels.pixels().len(),
                    width: 0,
                    height: 0,
                });
            }
            self.written.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn gradient(width: usize, height: usize) -> FloatImage {
        let samples = (0..width * height).map(|i| i as f32 * 0.5 - 3.0).collect();
        FloatImage::new(width, height, samples).unwrap()
    }

    fn renderer(factors: &[f64], modes: &[PaletteMode]) -> Renderer {
        Renderer::new(RenderConfig {
            plan: RenderPlan::new(factors, modes).unwrap(),
            threads: Some(4),
            ..RenderConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_every_job_reaches_the_sink() {
        let renderer = Renderer::new(RenderConfig::default()).unwrap();
        let sink = CollectingSink::default();

        let outcomes = renderer.render_frame(&gradient(16, 8), &sink);

        assert_eq!(outcomes.len(), 30);
        assert!(outcomes.iter().all(JobOutcome::is_ok));
        assert_eq!(sink.renders.lock().unwrap().len(), 30);
    }

    #[test]
    fn test_job_count_is_cross_product() {
        let renderer = renderer(
            &[1.0, 3.0, 7.5],
            &[PaletteMode::GreyScale, PaletteMode::RoyGBiv],
        );
        let sink = CollectingSink::default();

        let outcomes = renderer.render_frame(&gradient(5, 5), &sink);
        assert_eq!(outcomes.len(), 6);

        let renders = sink.renders.lock().unwrap();
        for job in renderer.plan().jobs() {
            assert_eq!(renders.iter().filter(|(j, _)| *j == job).count(), 1, "{job}");
        }
    }

    #[test]
    fn test_empty_frame_produces_no_jobs() {
        let renderer = Renderer::new(RenderConfig::default()).unwrap();
        let sink = CollectingSink::default();
        let empty = FloatImage::new(0, 0, Vec::new()).unwrap();

        let outcomes = renderer.render_frame(&empty, &sink);

        assert!(outcomes.is_empty());
        assert!(sink.renders.lock().unwrap().is_empty());
    }

    #[test]
    fn test_buffers_match_sequential_colorize() {
        let renderer = renderer(&[1.0, 2.0, 10.0], &PaletteMode::ALL);
        let sink = CollectingSink::default();
        let image = gradient(12, 7);

        renderer.render_frame(&image, &sink);

        let window = ViewWindow::full(image.samples()).unwrap();
        for (job, buffer) in sink.renders.lock().unwrap().iter() {
            let expected = colorize(&image, job.mode, &window, job.factor);
            assert_eq!(buffer, &expected, "{job}");
        }
    }

    #[test]
    fn test_two_pixel_scenario_through_scheduler() {
        let renderer = renderer(&[1.0, 2.0], &[PaletteMode::GreyScale]);
        let sink = CollectingSink::default();
        let image = FloatImage::new(2, 1, vec![0.0, 1.0]).unwrap();

        renderer.render_frame(&image, &sink);

        let renders = sink.renders.lock().unwrap();
        assert_eq!(renders.len(), 2);
        for (_, buffer) in renders.iter() {
            assert_eq!(buffer.pixels(), &[pack(0, 0, 0, 255), pack(255, 255, 255, 255)]);
        }
    }

    #[test]
    fn test_failed_jobs_do_not_stop_siblings() {
        let renderer = renderer(&[1.0, 2.0, 4.0], &PaletteMode::ALL);
        let sink = FailingBinarySink::default();

        let outcomes = renderer.render_frame(&gradient(9, 9), &sink);

        assert_eq!(outcomes.len(), 15);
        let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_ok()).collect();
        assert_eq!(failed.len(), 3);
        assert!(failed.iter().all(|o| o.job.mode == PaletteMode::Binary));
        assert_eq!(sink.written.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn test_sub_window_is_used() {
        let renderer = Renderer::new(RenderConfig {
            plan: RenderPlan::new(&[1.0], &[PaletteMode::GreyScale]).unwrap(),
            window_start: 0.0,
            window_end: 0.5,
            threads: Some(1),
        })
        .unwrap();
        let sink = CollectingSink::default();
        let image = FloatImage::new(3, 1, vec![0.0, 5.0, 10.0]).unwrap();

        renderer.render_frame(&image, &sink);

        let renders = sink.renders.lock().unwrap();
        let window = ViewWindow::compute(image.samples(), 0.0, 0.5).unwrap();
        let expected = colorize(&image, PaletteMode::GreyScale, &window, BandingFactor::LINEAR);
        assert_eq!(renders[0].1, expected);
        // Everything from the middle up is past the window
        assert_eq!(expected.pixels()[1], pack(255, 255, 255, 255));
        assert_eq!(expected.pixels()[2], pack(255, 255, 255, 255));
    }

    #[test]
    fn test_non_finite_window_is_rejected() {
        let result = Renderer::new(RenderConfig {
            window_end: f64::NAN,
            ..RenderConfig::default()
        });
        assert!(matches!(result, Err(RenderError::InvalidWindow { .. })));
    }
}
