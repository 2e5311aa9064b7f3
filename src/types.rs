//! Domain-specific types shared by the reader, colorizer and scheduler

use crate::image::ColorizeError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}

/// One decoded image plane: row-major `f32` samples, first row first
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage {
    dimensions: Dimensions,
    samples: Vec<f32>,
}

impl FloatImage {
    /// Wrap decoded samples, checking that they cover exactly `width * height`
    ///
    /// # Errors
    ///
    /// Returns `ColorizeError::InvalidArgument` if the sample count does not
    /// match the dimensions
    pub fn new(width: usize, height: usize, samples: Vec<f32>) -> Result<Self, ColorizeError> {
        let dimensions = Dimensions::new(width, height);
        if samples.len() != dimensions.pixel_count() {
            return Err(ColorizeError::InvalidArgument(format!(
                "{} samples do not fill a {dimensions} image",
                samples.len()
            )));
        }
        Ok(Self { dimensions, samples })
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Number of equal bands the view window is divided into
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BandingFactor(pub(crate) f64);

impl BandingFactor {
    /// Plain linear normalization, no banding
    pub const LINEAR: Self = Self(1.0);

    /// # Errors
    ///
    /// Returns `ColorizeError::InvalidArgument` for zero, negative or
    /// non-finite factors
    pub fn new(value: f64) -> Result<Self, ColorizeError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ColorizeError::InvalidArgument(format!(
                "banding factor must be a positive number, got {value}"
            )));
        }
        Ok(Self(value))
    }

    #[inline(always)]
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for BandingFactor {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl fmt::Display for BandingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
