//! Core traits for PCM sample types.
//!
//! [`PcmSample`] is implemented for the four storage widths a WAVE `data` chunk can hold:
//! `i8`, `i16`, [`I24`] and `i32`. Every transform is written once, generically over this
//! trait, and selected at runtime by an exhaustive match on [`BitDepth`](crate::BitDepth).

use std::fmt::Debug;

use crate::I24;
use crate::codec::ByteOrder;

/// A signed integer PCM sample stored in `WIDTH` bytes.
///
/// # Panics
///
/// The `read_*` and `write_*` methods index the first `WIDTH` bytes of the slice they are
/// given and panic if it is shorter. The buffer helpers in [`codec`](crate::codec) only
/// hand out exact-width slices.
pub trait PcmSample: Copy + Debug + Default + PartialEq + PartialOrd + Send + Sync {
    /// Bit depth of this sample type.
    const BITS: u16;
    /// Number of bytes one sample occupies in the sound data.
    const WIDTH: usize;
    /// Maximum representable value for this sample type.
    const MAX: Self;
    /// Minimum representable value for this sample type.
    const MIN: Self;

    /// Reads a little-endian sample from the first `WIDTH` bytes.
    fn read_le(bytes: &[u8]) -> Self;

    /// Reads a big-endian sample from the first `WIDTH` bytes.
    fn read_be(bytes: &[u8]) -> Self;

    /// Writes the sample little-endian into the first `WIDTH` bytes.
    fn write_le(self, out: &mut [u8]);

    /// Writes the sample big-endian into the first `WIDTH` bytes.
    fn write_be(self, out: &mut [u8]);

    /// Widens the sample to `i64`.
    fn to_i64(self) -> i64;

    /// Narrows an `i64`, clamping it into `[MIN, MAX]`.
    fn saturating_from_i64(value: i64) -> Self;

    #[inline]
    /// Reads a sample in the given byte order.
    fn read(bytes: &[u8], order: ByteOrder) -> Self {
        match order {
            ByteOrder::LittleEndian => Self::read_le(bytes),
            ByteOrder::BigEndian => Self::read_be(bytes),
        }
    }

    #[inline]
    /// Writes a sample in the given byte order.
    fn write(self, out: &mut [u8], order: ByteOrder) {
        match order {
            ByteOrder::LittleEndian => self.write_le(out),
            ByteOrder::BigEndian => self.write_be(out),
        }
    }

    #[inline]
    /// The 0 dBFS reference magnitude, `2^(BITS-1) - 1`.
    fn full_scale() -> f64 {
        Self::MAX.to_i64() as f64
    }
}

/// Generates `PcmSample` for the primitive integer widths.
macro_rules! impl_primitive_pcm_sample {
    ($type:ty, $width:expr) => {
        impl PcmSample for $type {
            const BITS: u16 = <$type>::BITS as u16;
            const WIDTH: usize = $width;
            const MAX: Self = <$type>::MAX;
            const MIN: Self = <$type>::MIN;

            #[inline(always)]
            fn read_le(bytes: &[u8]) -> Self {
                let mut raw = [0u8; $width];
                raw.copy_from_slice(&bytes[..$width]);
                <$type>::from_le_bytes(raw)
            }

            #[inline(always)]
            fn read_be(bytes: &[u8]) -> Self {
                let mut raw = [0u8; $width];
                raw.copy_from_slice(&bytes[..$width]);
                <$type>::from_be_bytes(raw)
            }

            #[inline(always)]
            fn write_le(self, out: &mut [u8]) {
                out[..$width].copy_from_slice(&self.to_le_bytes());
            }

            #[inline(always)]
            fn write_be(self, out: &mut [u8]) {
                out[..$width].copy_from_slice(&self.to_be_bytes());
            }

            #[inline(always)]
            fn to_i64(self) -> i64 {
                self as i64
            }

            #[inline(always)]
            fn saturating_from_i64(value: i64) -> Self {
                num_traits::clamp(value, <$type>::MIN as i64, <$type>::MAX as i64) as $type
            }
        }
    };
}

impl_primitive_pcm_sample!(i8, 1);
impl_primitive_pcm_sample!(i16, 2);
impl_primitive_pcm_sample!(i32, 4);

// 24-bit samples are packed in three bytes. The raw bytes are placed in the top of an i32
// and shifted back down so only the low 24 bits take part in sign extension.
impl PcmSample for I24 {
    const BITS: u16 = 24;
    const WIDTH: usize = 3;
    const MAX: Self = I24::MAX;
    const MIN: Self = I24::MIN;

    #[inline(always)]
    fn read_le(bytes: &[u8]) -> Self {
        let widened = i32::from_le_bytes([0, bytes[0], bytes[1], bytes[2]]) >> 8;
        I24::saturating_from_i32(widened)
    }

    #[inline(always)]
    fn read_be(bytes: &[u8]) -> Self {
        let widened = i32::from_be_bytes([bytes[0], bytes[1], bytes[2], 0]) >> 8;
        I24::saturating_from_i32(widened)
    }

    #[inline(always)]
    fn write_le(self, out: &mut [u8]) {
        let raw = self.to_i32().to_le_bytes();
        out[..3].copy_from_slice(&raw[..3]);
    }

    #[inline(always)]
    fn write_be(self, out: &mut [u8]) {
        let raw = self.to_i32().to_be_bytes();
        out[..3].copy_from_slice(&raw[1..]);
    }

    #[inline(always)]
    fn to_i64(self) -> i64 {
        self.to_i32() as i64
    }

    #[inline(always)]
    fn saturating_from_i64(value: i64) -> Self {
        let clamped = num_traits::clamp(
            value,
            I24::MIN.to_i32() as i64,
            I24::MAX.to_i32() as i64,
        );
        I24::saturating_from_i32(clamped as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i24_sign_extension() {
        // 0xFFFFFF is -1, 0x800000 is the most negative 24-bit value.
        assert_eq!(I24::read_le(&[0xFF, 0xFF, 0xFF]).to_i32(), -1);
        assert_eq!(I24::read_le(&[0x00, 0x00, 0x80]).to_i32(), -8_388_608);
        assert_eq!(I24::read_le(&[0xFF, 0xFF, 0x7F]).to_i32(), 8_388_607);
        assert_eq!(I24::read_be(&[0x80, 0x00, 0x00]).to_i32(), -8_388_608);
    }

    #[test]
    fn test_i24_write_round_trip() {
        let mut buf = [0u8; 3];
        for value in [-8_388_608, -1, 0, 1, 123_456, 8_388_607] {
            let sample = I24::saturating_from_i64(value);
            sample.write_le(&mut buf);
            assert_eq!(I24::read_le(&buf).to_i64(), value);
            sample.write_be(&mut buf);
            assert_eq!(I24::read_be(&buf).to_i64(), value);
        }
    }

    #[test]
    fn test_saturating_narrowing() {
        assert_eq!(i8::saturating_from_i64(1_000), i8::MAX);
        assert_eq!(i16::saturating_from_i64(-1_000_000), i16::MIN);
        assert_eq!(i32::saturating_from_i64(i64::MAX), i32::MAX);
        assert_eq!(I24::saturating_from_i64(9_000_000).to_i32(), 8_388_607);
    }

    #[test]
    fn test_full_scale() {
        assert_eq!(i8::full_scale(), 127.0);
        assert_eq!(i16::full_scale(), 32_767.0);
        assert_eq!(I24::full_scale(), 8_388_607.0);
        assert_eq!(i32::full_scale(), 2_147_483_647.0);
    }
}
