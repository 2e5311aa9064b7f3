//! Colorization pipeline
//!
//! Turns a decoded float frame into packed RGBA pixels: a [`ViewWindow`] picks
//! the value range, [`to_intensity`] maps each sample into `[0, 1]` with
//! optional banding, and a [`PaletteMode`] maps the intensity to a color.

mod banding;
mod colorize;
mod error;
pub mod palette;
mod window;

pub use banding::to_intensity;
pub use colorize::{PixelBuffer, colorize, colorize_into, pack, unpack};
pub use error::ColorizeError;
pub use palette::PaletteMode;
pub use window::{ViewWindow, find_min_max};
