//! View window computation
//!
//! The window is the sub-range of a frame's values that gets mapped onto the
//! full intensity scale. It is computed once per frame and shared by every
//! render job of that frame.

use super::ColorizeError;

/// Value range used to normalize samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub min: f64,
    pub max: f64,
    /// `max - min`, or `1.0` when that would be zero
    pub span: f64,
}

impl ViewWindow {
    /// Window covering the whole data range
    ///
    /// # Errors
    ///
    /// Returns `ColorizeError::EmptyInput` if `samples` is empty
    pub fn full(samples: &[f32]) -> Result<Self, ColorizeError> {
        Self::compute(samples, 0.0, 1.0)
    }

    /// Window spanning `[start_percent, end_percent]` of the data's `[min, max]`
    ///
    /// Percentages are fractions, so `(0.0, 1.0)` is the full range.
    ///
    /// # Errors
    ///
    /// Returns `ColorizeError::EmptyInput` if `samples` is empty
    pub fn compute(samples: &[f32], start_percent: f64, end_percent: f64) -> Result<Self, ColorizeError> {
        if samples.is_empty() {
            return Err(ColorizeError::EmptyInput);
        }

        let (global_min, global_max) = find_min_max(samples);
        let distance = global_max - global_min;

        let min = global_min + distance * start_percent;
        let max = global_min + distance * end_percent;
        let mut span = max - min;

        // Flat frames: every sample lands at offset 0 instead of dividing by zero
        if span == 0.0 {
            span = 1.0;
        }

        Ok(Self { min, max, span })
    }
}

/// Min and max of the non-NaN samples, `(0, 0)` if there are none
#[inline]
#[must_use]
pub fn find_min_max(samples: &[f32]) -> (f64, f64) {
    let (min, max) = samples
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &val| {
            (min.min(val), max.max(val))
        });

    if min > max {
        (0.0, 0.0)
    } else {
        (f64::from(min), f64::from(max))
    }
}
