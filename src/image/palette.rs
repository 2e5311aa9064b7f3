//! Palette encoders
//!
//! Every palette is a pure function from an intensity in `[0, 1]` to an RGB
//! triple. Opacity is not the encoder's business; the colorizer packs every
//! pixel as fully opaque.

use super::ColorizeError;
use image::Rgb;
use std::fmt;
use std::str::FromStr;

/// Largest value of a three byte (24-bit) ramp
const NICK_RGB_MAX: u32 = u32::MAX >> 8;
/// Largest value of a two byte (16-bit) ramp
const SHORT_NRGB_MAX: u32 = u32::MAX >> 16;

/// False-color mapping applied to each intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteMode {
    /// Single monotonic ramp through the whole 24-bit RGB space
    NickRgb,
    /// Same ramp limited to 16 bits (red and green only)
    ShortNRgb,
    /// Six segment rainbow, red at full intensity to magenta at zero
    RoyGBiv,
    GreyScale,
    /// Black below one half, white from one half up
    Binary,
}

impl PaletteMode {
    /// Every mode, in the order renders are produced by default
    pub const ALL: [Self; 5] = [
        Self::GreyScale,
        Self::RoyGBiv,
        Self::NickRgb,
        Self::Binary,
        Self::ShortNRgb,
    ];

    /// Lowercase name used on the command line and in output filenames
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::NickRgb => "nickrgb",
            Self::ShortNRgb => "snrgb",
            Self::RoyGBiv => "roygbiv",
            Self::GreyScale => "greyscale",
            Self::Binary => "binary",
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn encode(self, intensity: f64) -> Rgb<u8> {
        match self {
            Self::NickRgb => nick_rgb(intensity),
            Self::ShortNRgb => short_nrgb(intensity),
            Self::RoyGBiv => roygbiv(intensity),
            Self::GreyScale => greyscale(intensity),
            Self::Binary => binary(intensity),
        }
    }
}

impl FromStr for PaletteMode {
    type Err = ColorizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nickrgb" => Ok(Self::NickRgb),
            "snrgb" | "shortnrgb" => Ok(Self::ShortNRgb),
            "roygbiv" => Ok(Self::RoyGBiv),
            "greyscale" | "grayscale" => Ok(Self::GreyScale),
            "binary" => Ok(Self::Binary),
            other => Err(ColorizeError::InvalidArgument(format!(
                "unknown palette mode: {other}"
            ))),
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Split the low three bytes of a ramp value into R, G, B
#[inline(always)]
fn ramp_to_rgb(value: u32) -> Rgb<u8> {
    let [r, g, b, _] = value.to_le_bytes();
    Rgb([r, g, b])
}

#[inline]
#[must_use]
pub fn nick_rgb(intensity: f64) -> Rgb<u8> {
    ramp_to_rgb((f64::from(NICK_RGB_MAX) * intensity) as u32)
}

#[inline]
#[must_use]
pub fn short_nrgb(intensity: f64) -> Rgb<u8> {
    ramp_to_rgb((f64::from(SHORT_NRGB_MAX) * intensity) as u32)
}

#[inline]
#[must_use]
pub fn roygbiv(intensity: f64) -> Rgb<u8> {
    // Invert and group into five 0.2 wide segments; kept in f32 so segment
    // boundaries land on the same values as the reference colors
    let a = ((1.0 - intensity) / 0.20) as f32;
    let segment = a.floor();
    let y = (255.0 * f64::from(a - segment)).floor() as u8;

    match (segment as i32).clamp(0, 5) {
        0 => Rgb([255, y, 0]),
        1 => Rgb([255 - y, 255, 0]),
        2 => Rgb([0, 255, y]),
        3 => Rgb([0, 255 - y, 255]),
        4 => Rgb([y, 0, 255]),
        _ => Rgb([255, 0, 255]),
    }
}

#[inline]
#[must_use]
pub fn greyscale(intensity: f64) -> Rgb<u8> {
    let grey = (intensity * f64::from(u8::MAX)).round() as u8;
    Rgb([grey, grey, grey])
}

#[inline]
#[must_use]
pub fn binary(intensity: f64) -> Rgb<u8> {
    let bit = intensity.round() as u8;
    let grey = u8::MAX * bit.min(1);
    Rgb([grey, grey, grey])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_greyscale_endpoints() {
        assert_eq!(greyscale(0.0), Rgb([0, 0, 0]));
        assert_eq!(greyscale(1.0), Rgb([255, 255, 255]));
        assert_eq!(greyscale(0.5), Rgb([128, 128, 128]));
    }

    #[test]
    fn test_binary_only_black_or_white() {
        for step in 0..=1000 {
            let color = binary(f64::from(step) / 1000.0);
            assert!(
                color == Rgb([0, 0, 0]) || color == Rgb([255, 255, 255]),
                "unexpected color {color:?} at step {step}"
            );
        }
        assert_eq!(binary(0.49), Rgb([0, 0, 0]));
        assert_eq!(binary(0.5), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_roygbiv_endpoints() {
        assert_eq!(roygbiv(1.0), Rgb([255, 0, 0]));
        assert_eq!(roygbiv(0.0), Rgb([255, 0, 255]));

        let near_zero = roygbiv(0.001);
        assert!(near_zero[0] >= 250, "red should approach 255, got {near_zero:?}");
        assert_eq!(near_zero[1], 0);
        assert_eq!(near_zero[2], 255);
    }

    #[test]
    fn test_roygbiv_segments() {
        // a = 0.5 in segment 0
        assert_eq!(roygbiv(0.9), Rgb([255, 127, 0]));
        // a = 2.5 in segment 2
        assert_eq!(roygbiv(0.5), Rgb([0, 255, 127]));
        // a = 1.0 starts segment 1 at full green
        assert_eq!(roygbiv(0.8), Rgb([255, 255, 0]));
    }

    #[test]
    fn test_nick_rgb_ramp() {
        assert_eq!(nick_rgb(0.0), Rgb([0, 0, 0]));
        assert_eq!(nick_rgb(1.0), Rgb([255, 255, 255]));
        // 0x7FFFFF: low bytes first
        assert_eq!(nick_rgb(0.5), Rgb([0xFF, 0xFF, 0x7F]));
    }

    #[test]
    fn test_short_nrgb_ramp_never_uses_blue() {
        assert_eq!(short_nrgb(1.0), Rgb([255, 255, 0]));
        assert_eq!(short_nrgb(0.5), Rgb([0xFF, 0x7F, 0]));
        for step in 0..=100 {
            assert_eq!(short_nrgb(f64::from(step) / 100.0)[2], 0);
        }
    }

    #[test]
    fn test_parse_mode_names() {
        for mode in PaletteMode::ALL {
            assert_eq!(mode.name().parse::<PaletteMode>().unwrap(), mode);
        }
        assert_eq!("GrayScale".parse::<PaletteMode>().unwrap(), PaletteMode::GreyScale);
        assert_matches!(
            "sepia".parse::<PaletteMode>(),
            Err(ColorizeError::InvalidArgument(_))
        );
    }

    #[test]
    fn test_encode_dispatch() {
        assert_eq!(PaletteMode::GreyScale.encode(1.0), greyscale(1.0));
        assert_eq!(PaletteMode::RoyGBiv.encode(0.3), roygbiv(0.3));
        assert_eq!(PaletteMode::Binary.encode(0.7), binary(0.7));
    }
}
