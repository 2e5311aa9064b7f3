use thiserror::Error;

/// Failure to set up the renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid view window [{start}, {end}]: bounds must be finite")]
    InvalidWindow { start: f64, end: f64 },

    #[error("Failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Failure to hand one finished render to its sink
///
/// Reported per job; never aborts sibling jobs.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to encode {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Pixel buffer of {actual} pixels does not fit {width}x{height}")]
    BufferSize {
        actual: usize,
        width: usize,
        height: usize,
    },

    #[error("Image {width}x{height} is too large for the output format")]
    TooLarge { width: usize, height: usize },
}
