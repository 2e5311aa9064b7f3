use std::path::PathBuf;
use thiserror::Error;

/// Failure to decode a FITS file
///
/// Any of these ends the whole file: frames are never partially recovered.
#[derive(Debug, Error)]
pub enum FitsError {
    #[error("Failed to read FITS file {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a FITS file: {0}")]
    NotFits(String),

    #[error("HDU {hdu}: missing or invalid {keyword} keyword")]
    MissingKeyword { hdu: usize, keyword: String },

    #[error("HDU {hdu}: invalid value for {keyword}: {value}")]
    InvalidKeyword {
        hdu: usize,
        keyword: String,
        value: String,
    },

    #[error("HDU {hdu}: unsupported BITPIX {bitpix} (expected 8, 16, 32, 64, -32 or -64)")]
    UnsupportedBitpix { hdu: usize, bitpix: i64 },

    #[error("HDU {hdu}: file ends inside the {section}")]
    UnexpectedEof { hdu: usize, section: &'static str },
}
