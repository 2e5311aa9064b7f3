//! Frame colorizer
//!
//! Runs windowing, banding and one palette across a whole frame into a
//! packed-pixel buffer.

use super::banding::to_intensity;
use super::{PaletteMode, ViewWindow};
use crate::types::{BandingFactor, Dimensions, FloatImage};

/// Pack four channels so that byte 0 of the little-endian representation is
/// `r`, byte 1 is `g`, byte 2 is `b` and byte 3 is `a`
#[inline(always)]
#[must_use]
pub fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

/// Inverse of [`pack`]: `[r, g, b, a]`
#[inline(always)]
#[must_use]
pub fn unpack(pixel: u32) -> [u8; 4] {
    pixel.to_le_bytes()
}

/// Packed RGBA pixels of one render, row-major like the source frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    dimensions: Dimensions,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Zeroed buffer for a frame of the given size
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            pixels: vec![0; dimensions.pixel_count()],
        }
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// RGBA bytes in the declared channel order, four per pixel
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&pixel| unpack(pixel)).collect()
    }

    /// Resize in place, reusing the allocation when it is large enough
    fn reset(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
        self.pixels.resize(dimensions.pixel_count(), 0);
    }
}

/// Colorize a whole frame into a fresh buffer
#[must_use]
pub fn colorize(
    image: &FloatImage,
    mode: PaletteMode,
    window: &ViewWindow,
    factor: BandingFactor,
) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(image.dimensions());
    colorize_into(&mut buffer, image, mode, window, factor);
    buffer
}

/// Colorize a whole frame into an existing buffer, overwriting every pixel
pub fn colorize_into(
    buffer: &mut PixelBuffer,
    image: &FloatImage,
    mode: PaletteMode,
    window: &ViewWindow,
    factor: BandingFactor,
) {
    buffer.reset(image.dimensions());

    // Parallelism lives one level up, across render jobs
    let factor = factor.get();
    for (pixel, &sample) in buffer.pixels.iter_mut().zip(image.samples()) {
        let intensity = to_intensity(f64::from(sample), window, factor);
        let [r, g, b] = mode.encode(intensity).0;
        *pixel = pack(r, g, b, u8::MAX);
    }
}
