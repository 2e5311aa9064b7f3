//! FITS image data decoding
//!
//! Image data is stored big-endian in the type given by BITPIX. Every type is
//! converted to physical `f32` values through `BZERO + BSCALE * raw`.

use super::FitsError;

/// On-disk pixel type of an image HDU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitpix {
    U8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl Bitpix {
    pub fn from_value(bitpix: i64, hdu: usize) -> Result<Self, FitsError> {
        match bitpix {
            8 => Ok(Self::U8),
            16 => Ok(Self::I16),
            32 => Ok(Self::I32),
            64 => Ok(Self::I64),
            -32 => Ok(Self::F32),
            -64 => Ok(Self::F64),
            other => Err(FitsError::UnsupportedBitpix { hdu, bitpix: other }),
        }
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> i64 {
        match self {
            Self::U8 => 8,
            Self::I16 => 16,
            Self::I32 => 32,
            Self::I64 => 64,
            Self::F32 => -32,
            Self::F64 => -64,
        }
    }

    #[inline]
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        self.value().unsigned_abs() as usize / 8
    }
}

/// Linear calibration from stored to physical values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub bscale: f64,
    pub bzero: f64,
}

impl Scaling {
    #[must_use]
    pub fn new(bscale: f64, bzero: f64) -> Self {
        Self { bscale, bzero }
    }

    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.bscale == 1.0 && self.bzero == 0.0
    }

    // Hot path: called for every pixel during decoding
    #[inline(always)]
    #[must_use]
    pub fn apply(&self, raw: f64) -> f32 {
        (self.bzero + self.bscale * raw) as f32
    }
}

impl Default for Scaling {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// Decode `count` pixels from the start of `raw`
///
/// `raw` must hold at least `count * bitpix.bytes_per_pixel()` bytes.
#[must_use]
pub fn decode_samples(raw: &[u8], bitpix: Bitpix, count: usize, scaling: Scaling) -> Vec<f32> {
    let raw = &raw[..count * bitpix.bytes_per_pixel()];

    match bitpix {
        Bitpix::U8 => raw.iter().map(|&b| scaling.apply(f64::from(b))).collect(),
        Bitpix::I16 => raw
            .chunks_exact(2)
            .map(|chunk| scaling.apply(f64::from(i16::from_be_bytes([chunk[0], chunk[1]]))))
            .collect(),
        Bitpix::I32 => raw
            .chunks_exact(4)
            .map(|chunk| {
                let v = i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                scaling.apply(f64::from(v))
            })
            .collect(),
        Bitpix::I64 => raw
            .chunks_exact(8)
            .map(|chunk| {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(chunk);
                scaling.apply(i64::from_be_bytes(bytes) as f64)
            })
            .collect(),
        Bitpix::F32 => {
            let values = raw
                .chunks_exact(4)
                .map(|chunk| f32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
            if scaling.is_identity() {
                values.collect()
            } else {
                values.map(|v| scaling.apply(f64::from(v))).collect()
            }
        }
        Bitpix::F64 => raw
            .chunks_exact(8)
            .map(|chunk| {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(chunk);
                scaling.apply(f64::from_be_bytes(bytes))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_bitpix_values() {
        for value in [8, 16, 32, 64, -32, -64] {
            let bitpix = Bitpix::from_value(value, 0).unwrap();
            assert_eq!(bitpix.value(), value);
            assert_eq!(bitpix.bytes_per_pixel(), value.unsigned_abs() as usize / 8);
        }
        assert_matches!(
            Bitpix::from_value(24, 3),
            Err(FitsError::UnsupportedBitpix { hdu: 3, bitpix: 24 })
        );
    }

    #[test]
    fn test_decode_u8() {
        let samples = decode_samples(&[0, 127, 255], Bitpix::U8, 3, Scaling::default());
        assert_eq!(samples, vec![0.0, 127.0, 255.0]);
    }

    #[test]
    fn test_decode_i16_with_bzero() {
        // Unsigned 16-bit convention: BZERO = 32768
        let raw: Vec<u8> = [-32768_i16, 0, 32767]
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .collect();
        let samples = decode_samples(&raw, Bitpix::I16, 3, Scaling::new(1.0, 32768.0));
        assert_eq!(samples, vec![0.0, 32768.0, 65535.0]);
    }

    #[test]
    fn test_decode_i32_with_bscale() {
        let raw: Vec<u8> = [-4_i32, 10].iter().flat_map(|v| v.to_be_bytes()).collect();
        let samples = decode_samples(&raw, Bitpix::I32, 2, Scaling::new(0.5, 1.0));
        assert_eq!(samples, vec![-1.0, 6.0]);
    }

    #[test]
    fn test_decode_i64() {
        let raw: Vec<u8> = [1_i64 << 40, -7].iter().flat_map(|v| v.to_be_bytes()).collect();
        let samples = decode_samples(&raw, Bitpix::I64, 2, Scaling::default());
        assert_eq!(samples, vec![(1_i64 << 40) as f32, -7.0]);
    }

    #[test]
    fn test_decode_floats() {
        let raw: Vec<u8> = [1.5_f32, -0.25, f32::NAN]
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .collect();
        let samples = decode_samples(&raw, Bitpix::F32, 3, Scaling::default());
        assert_eq!(&samples[..2], &[1.5, -0.25]);
        assert!(samples[2].is_nan());

        let raw: Vec<u8> = [2.0_f64, 1.0e-3].iter().flat_map(|v| v.to_be_bytes()).collect();
        let samples = decode_samples(&raw, Bitpix::F64, 2, Scaling::new(2.0, 0.0));
        assert_eq!(samples, vec![4.0, 2.0e-3_f64 as f32]);
    }

    #[test]
    fn test_decode_only_first_plane() {
        let raw: Vec<u8> = (0..8u8).collect();
        let samples = decode_samples(&raw, Bitpix::U8, 4, Scaling::default());
        assert_eq!(samples, vec![0.0, 1.0, 2.0, 3.0]);
    }
}
