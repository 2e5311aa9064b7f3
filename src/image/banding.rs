//! Banding transform: raw sample to display intensity
//!
//! The window is split into `factor` equal bands and each sample maps to its
//! fractional position inside its band, so factors above one produce
//! repeating contour-like stripes instead of one smooth gradient.

use super::ViewWindow;

/// Map a raw sample to an intensity in `[0, 1]`
///
/// Samples are not clamped to the window first. Samples at or past the far
/// edge of the window (and NaN) come out at full intensity. Samples below the
/// window have a negative offset; subtracting `band * floor(offset / band)`
/// still leaves a remainder in `[0, band)`, so they wrap into bands the same
/// way in-window samples do.
// Hot path: called for every pixel of every render job
#[inline(always)]
#[must_use]
pub fn to_intensity(sample: f64, window: &ViewWindow, factor: f64) -> f64 {
    let band = window.span / factor;
    let mut offset = sample - window.min;

    if offset < window.span {
        offset -= band * (offset / band).floor();
        // Rounding in the remainder can land a hair outside the band
        (offset / band).clamp(0.0, 1.0)
    } else {
        1.0
    }
}
