use crate::fits::FitsError;
use thiserror::Error;

/// Why a whole input file failed
#[derive(Debug, Error)]
pub enum ProcessError {
    /// File could not be read or is not FITS; nothing was rendered
    #[error("{0}")]
    NotAFitsFile(FitsError),

    /// An HDU failed to decode; frames before it may already be written
    #[error("{0}")]
    DecodeFailed(FitsError),

    /// Every frame decoded, but some renders could not be written
    #[error("{failed} of {total} render jobs failed")]
    JobsFailed { failed: usize, total: usize },
}
