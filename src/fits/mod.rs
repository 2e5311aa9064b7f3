//! FITS file reading
//!
//! This module walks the HDUs of a FITS file and yields every image plane as
//! a [`FloatImage`]. HDUs without image data (NAXIS = 0, tables) are skipped
//! but still count towards the HDU index used in output filenames.

mod error;
mod header;
mod pixel_data;
mod validation;

pub use error::FitsError;
pub use header::{Header, HeaderValue};
pub use pixel_data::{Bitpix, Scaling};
pub use validation::{HduKind, HduLayout};

use crate::types::FloatImage;
use std::path::Path;
use tracing::debug;

/// FITS files are organized in blocks of this many bytes
pub const BLOCK_SIZE: usize = 2880;
/// Length of one header card
pub const CARD_SIZE: usize = 80;

/// Round a byte length up to a whole number of blocks
#[inline]
#[must_use]
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}

/// One decoded image HDU
#[derive(Debug, Clone)]
pub struct Frame {
    /// Position of the HDU in the file, primary = 0
    pub hdu_index: usize,
    pub header: Header,
    pub bitpix: Bitpix,
    pub image: FloatImage,
}

/// A FITS file held in memory
#[derive(Debug, Clone)]
pub struct FitsFile {
    data: Vec<u8>,
}

impl FitsFile {
    /// Read a FITS file from disk
    ///
    /// # Errors
    ///
    /// Returns `FitsError::Io` if the file cannot be read, or
    /// `FitsError::NotFits` if it does not start with a `SIMPLE` card
    pub fn open(path: &Path) -> Result<Self, FitsError> {
        let data = std::fs::read(path).map_err(|source| FitsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, data)
    }

    /// Wrap FITS bytes that were already loaded
    ///
    /// # Errors
    ///
    /// Returns `FitsError::NotFits` if the data does not start with a `SIMPLE` card
    pub fn from_bytes(path: &Path, data: Vec<u8>) -> Result<Self, FitsError> {
        if !data.starts_with(b"SIMPLE  =") {
            return Err(FitsError::NotFits(format!(
                "{} does not start with a SIMPLE card",
                path.display()
            )));
        }
        Ok(Self { data })
    }

    /// Iterate over the image frames, in file order
    ///
    /// The iterator stops after the first error.
    #[must_use]
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            data: &self.data,
            offset: 0,
            hdu_index: 0,
            done: false,
        }
    }
}

/// Iterator over the image HDUs of a [`FitsFile`]
#[derive(Debug)]
pub struct Frames<'a> {
    data: &'a [u8],
    offset: usize,
    hdu_index: usize,
    done: bool,
}

impl Frames<'_> {
    /// Parse the HDU at the current offset and step past it
    ///
    /// Returns `Ok(None)` for HDUs that carry no image.
    fn read_hdu(&mut self) -> Result<Option<Frame>, FitsError> {
        let hdu = self.hdu_index;
        let rest = &self.data[self.offset..];

        let (header, header_len) = header::parse_header(rest, hdu)?;
        let layout = validation::validate_layout(&header, hdu)?;

        let data_start = header_len;
        let data_end = data_start
            .checked_add(layout.data_len)
            .filter(|&end| end <= rest.len())
            .ok_or(FitsError::UnexpectedEof { hdu, section: "data unit" })?;

        // The final block of the last HDU is sometimes left unpadded
        self.offset += (header_len + padded_len(layout.data_len)).min(rest.len());
        self.hdu_index += 1;

        if !layout.kind.is_image() {
            debug!(hdu, kind = ?layout.kind, "Skipping non-image HDU");
            return Ok(None);
        }

        let Some((width, height)) = layout.plane() else {
            debug!(hdu, "Skipping HDU without axes");
            return Ok(None);
        };

        let bitpix = Bitpix::from_value(layout.bitpix, hdu)?;

        // A zero-length higher axis leaves no data even when the plane has a size
        let Some(count) = width
            .checked_mul(height)
            .filter(|&n| n.checked_mul(bitpix.bytes_per_pixel()).is_some_and(|len| len <= layout.data_len))
        else {
            debug!(hdu, width, height, data_len = layout.data_len, "Skipping HDU without image data");
            return Ok(None);
        };

        let scaling = Scaling::new(
            header.get_real("BSCALE").unwrap_or(1.0),
            header.get_real("BZERO").unwrap_or(0.0),
        );

        let samples = pixel_data::decode_samples(&rest[data_start..data_end], bitpix, count, scaling);
        let image = FloatImage::new(width, height, samples).map_err(|e| FitsError::InvalidKeyword {
            hdu,
            keyword: "NAXIS".to_string(),
            value: e.to_string(),
        })?;

        debug!(hdu, dimensions = %image.dimensions(), bitpix = bitpix.value(), "Decoded image HDU");

        Ok(Some(Frame {
            hdu_index: hdu,
            header,
            bitpix,
            image,
        }))
    }
}

impl Iterator for Frames<'_> {
    type Item = Result<Frame, FitsError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done || self.offset >= self.data.len() {
                return None;
            }

            // Anything after the last HDU that is not another extension is padding
            if self.hdu_index > 0 && !self.data[self.offset..].starts_with(b"XTENSION") {
                self.done = true;
                return None;
            }

            match self.read_hdu() {
                Ok(Some(frame)) => return Some(Ok(frame)),
                Ok(None) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
