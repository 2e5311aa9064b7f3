use thiserror::Error;

/// Failures of the pure colorization math
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorizeError {
    /// The frame has no samples; callers skip it rather than colorize
    #[error("frame has no samples")]
    EmptyInput,

    /// Bad factor, palette name or image shape, raised before any buffer is allocated
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
