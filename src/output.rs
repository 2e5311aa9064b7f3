//! BMP output
//!
//! Writes each finished render as a 32-bit BMP file next to its siblings,
//! named after the source file, the HDU index, the palette and the banding
//! factor.

use crate::image::PixelBuffer;
use crate::render::{RasterSink, RenderJob, WriteError};
use image::{ImageFormat, RgbaImage, imageops};
use std::path::{Path, PathBuf};

/// Deterministic output filename for one job of one frame
///
/// `{file_name}_{hdu_index}_{mode}_{factor}.bmp`, unique for every
/// (frame, factor, palette) triple of a given input file.
#[must_use]
pub fn output_file_name(file_name: &str, hdu_index: usize, job: &RenderJob) -> String {
    format!(
        "{file_name}_{hdu_index}_{mode}_{factor}.bmp",
        mode = job.mode,
        factor = job.factor
    )
}

/// Turn a packed buffer into an image ready for encoding
///
/// FITS stores the bottom row first, so rows are flipped to put it at the
/// bottom of the picture.
///
/// # Errors
///
/// Returns `WriteError::TooLarge` or `WriteError::BufferSize` if the buffer
/// cannot be represented as an RGBA image
pub fn to_rgba_image(pixels: &PixelBuffer) -> Result<RgbaImage, WriteError> {
    let dims = pixels.dimensions();
    let too_large = || WriteError::TooLarge {
        width: dims.width,
        height: dims.height,
    };
    let width = u32::try_from(dims.width).map_err(|_| too_large())?;
    let height = u32::try_from(dims.height).map_err(|_| too_large())?;

    let mut image = RgbaImage::from_raw(width, height, pixels.to_rgba_bytes()).ok_or(
        WriteError::BufferSize {
            actual: pixels.pixels().len(),
            width: dims.width,
            height: dims.height,
        },
    )?;
    imageops::flip_vertical_in_place(&mut image);

    Ok(image)
}

/// [`RasterSink`] that writes one BMP per job for a single frame
#[derive(Debug, Clone)]
pub struct BmpWriter {
    output_dir: PathBuf,
    file_name: String,
    hdu_index: usize,
}

impl BmpWriter {
    /// Writer for the frame at `hdu_index` of the input file `source`
    #[must_use]
    pub fn new(output_dir: &Path, source: &Path, hdu_index: usize) -> Self {
        let file_name = source
            .file_name()
            .map_or_else(|| "frame".to_string(), |n| n.to_string_lossy().into_owned());

        Self {
            output_dir: output_dir.to_path_buf(),
            file_name,
            hdu_index,
        }
    }

    /// Where the render for `job` ends up
    #[must_use]
    pub fn path_for(&self, job: &RenderJob) -> PathBuf {
        self.output_dir
            .join(output_file_name(&self.file_name, self.hdu_index, job))
    }
}

impl RasterSink for BmpWriter {
    fn write(&self, job: &RenderJob, pixels: &PixelBuffer) -> Result<(), WriteError> {
        let path = self.path_for(job);
        let image = to_rgba_image(pixels)?;

        image
            .save_with_format(&path, ImageFormat::Bmp)
            .map_err(|source| WriteError::Image {
                path: path.display().to_string(),
                source,
            })
    }
}
