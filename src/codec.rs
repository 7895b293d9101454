//! # Sample Codec
//!
//! Interprets and produces fixed-width signed integer samples from raw sound-data bytes.
//!
//! A WAVE `data` chunk is a flat byte buffer; how it splits into samples depends on the
//! `bits_per_sample` field of the `fmt ` chunk. This module turns that runtime value into a
//! [`BitDepth`] and dispatches every sample access to the matching [`PcmSample`]
//! implementation through an exhaustive match, so no byte buffer is ever reinterpreted
//! in place.
//!
//! ```rust
//! use riff_pcm::{BitDepth, decode_sample, encode_sample};
//!
//! let bytes = encode_sample(-1_234, BitDepth::TwentyFour);
//! assert_eq!(bytes.as_ref().len(), 3);
//! assert_eq!(decode_sample(bytes.as_ref(), BitDepth::TwentyFour).unwrap(), -1_234);
//!
//! // Out-of-range values clamp instead of wrapping.
//! let clipped = encode_sample(70_000, BitDepth::Sixteen);
//! assert_eq!(decode_sample(clipped.as_ref(), BitDepth::Sixteen).unwrap(), i16::MAX as i32);
//! ```

use core::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use crate::chunks::DATA_CHUNK;
use crate::traits::PcmSample;
use crate::{WavError, WavResult};

/// Runs `$body` with `$sample` bound to the sample type of `$depth`.
macro_rules! dispatch_depth {
    ($depth:expr, $sample:ident => $body:expr) => {
        match $depth {
            $crate::codec::BitDepth::Eight => {
                type $sample = i8;
                $body
            }
            $crate::codec::BitDepth::Sixteen => {
                type $sample = i16;
                $body
            }
            $crate::codec::BitDepth::TwentyFour => {
                type $sample = $crate::I24;
                $body
            }
            $crate::codec::BitDepth::ThirtyTwo => {
                type $sample = i32;
                $body
            }
        }
    };
}
pub(crate) use dispatch_depth;

/// Byte order of every multi-byte field and sample in a container.
///
/// `RIFF` containers are little-endian, `RIFX` containers big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first (`RIFF`).
    #[default]
    LittleEndian,
    /// Most significant byte first (`RIFX`).
    BigEndian,
}

impl ByteOrder {
    pub(crate) fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    pub(crate) fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }

    pub(crate) fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    pub(crate) fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }
}

/// Sample widths with a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// Signed 8-bit samples.
    Eight,
    /// Signed 16-bit samples.
    Sixteen,
    /// Signed 24-bit samples packed in three bytes.
    TwentyFour,
    /// Signed 32-bit samples.
    ThirtyTwo,
}

impl BitDepth {
    /// Maps a `bits_per_sample` field onto a supported depth.
    ///
    /// # Errors
    ///
    /// [`WavError::UnsupportedBitDepth`] for anything other than 8, 16, 24 or 32.
    pub fn from_bits(bits: u16) -> WavResult<Self> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            24 => Ok(BitDepth::TwentyFour),
            32 => Ok(BitDepth::ThirtyTwo),
            other => Err(WavError::UnsupportedBitDepth(other)),
        }
    }

    /// Bits per sample.
    pub const fn bits(self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
            BitDepth::TwentyFour => 24,
            BitDepth::ThirtyTwo => 32,
        }
    }

    /// Bytes per sample.
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Largest representable sample value, which is also the 0 dBFS reference.
    pub const fn max_value(self) -> i64 {
        (1_i64 << (self.bits() - 1)) - 1
    }

    /// Smallest representable sample value.
    pub const fn min_value(self) -> i64 {
        -(1_i64 << (self.bits() - 1))
    }

    /// Full-scale magnitude as a float, `2^(bits-1) - 1`.
    pub const fn full_scale(self) -> f64 {
        self.max_value() as f64
    }
}

impl Display for BitDepth {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-bit", self.bits())
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = WavError;

    fn try_from(bits: u16) -> WavResult<Self> {
        BitDepth::from_bits(bits)
    }
}

/// An encoded sample: up to four bytes, of which the first `len` are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBytes {
    buf: [u8; 4],
    len: usize,
}

impl Deref for SampleBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl AsRef<[u8]> for SampleBytes {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

/// Decodes one little-endian sample.
///
/// # Errors
///
/// [`WavError::TruncatedData`] if `bytes` is shorter than the depth's width.
pub fn decode_sample(bytes: &[u8], depth: BitDepth) -> WavResult<i32> {
    decode_sample_ordered(bytes, depth, ByteOrder::LittleEndian)
}

/// Decodes one sample in the given byte order.
///
/// # Errors
///
/// [`WavError::TruncatedData`] if `bytes` is shorter than the depth's width.
pub fn decode_sample_ordered(bytes: &[u8], depth: BitDepth, order: ByteOrder) -> WavResult<i32> {
    if bytes.len() < depth.bytes() {
        return Err(WavError::TruncatedData {
            chunk: DATA_CHUNK,
            expected: depth.bytes(),
            available: bytes.len(),
        });
    }
    Ok(dispatch_depth!(depth, S => S::read(bytes, order).to_i64() as i32))
}

/// Encodes one little-endian sample, clamping `value` into the depth's range.
pub fn encode_sample(value: i64, depth: BitDepth) -> SampleBytes {
    let mut buf = [0u8; 4];
    encode_into_unchecked(value, depth, ByteOrder::LittleEndian, &mut buf);
    SampleBytes {
        buf,
        len: depth.bytes(),
    }
}

/// Encodes one sample into the front of `out`, clamping `value` into the depth's range.
///
/// # Errors
///
/// [`WavError::InvalidParameter`] if `out` is shorter than the depth's width.
pub fn encode_sample_into(
    value: i64,
    depth: BitDepth,
    order: ByteOrder,
    out: &mut [u8],
) -> WavResult<()> {
    if out.len() < depth.bytes() {
        return Err(WavError::invalid_parameter(format!(
            "output slice of {} bytes cannot hold a {depth} sample",
            out.len()
        )));
    }
    encode_into_unchecked(value, depth, order, out);
    Ok(())
}

#[inline]
fn encode_into_unchecked(value: i64, depth: BitDepth, order: ByteOrder, out: &mut [u8]) {
    dispatch_depth!(depth, S => S::saturating_from_i64(value).write(out, order));
}

/// Calls `f` with every whole sample of `bytes`, in buffer order.
///
/// Trailing bytes that do not form a whole sample are ignored.
pub fn for_each_sample(bytes: &[u8], depth: BitDepth, order: ByteOrder, mut f: impl FnMut(i64)) {
    match depth {
        // Single bytes have no order; view the buffer as signed bytes directly.
        BitDepth::Eight => bytemuck::cast_slice::<u8, i8>(bytes)
            .iter()
            .for_each(|&s| f(s as i64)),
        _ => dispatch_depth!(depth, S => for_each_typed::<S>(bytes, order, &mut f)),
    }
}

fn for_each_typed<S: PcmSample>(bytes: &[u8], order: ByteOrder, f: &mut impl FnMut(i64)) {
    for chunk in bytes.chunks_exact(S::WIDTH) {
        f(S::read(chunk, order).to_i64());
    }
}

/// Replaces every whole sample `s` of `bytes` with `f(s)`, clamped into the depth's range.
///
/// Samples are visited in buffer order, so for interleaved data the sample at index `i`
/// belongs to channel `i % channels`. Trailing partial-sample bytes are left untouched.
pub fn map_samples_in_place(
    bytes: &mut [u8],
    depth: BitDepth,
    order: ByteOrder,
    mut f: impl FnMut(i64) -> i64,
) {
    match depth {
        BitDepth::Eight => bytemuck::cast_slice_mut::<u8, i8>(bytes)
            .iter_mut()
            .for_each(|s| *s = i8::saturating_from_i64(f(*s as i64))),
        _ => dispatch_depth!(depth, S => map_typed::<S>(bytes, order, &mut f)),
    }
}

fn map_typed<S: PcmSample>(bytes: &mut [u8], order: ByteOrder, f: &mut impl FnMut(i64) -> i64) {
    for chunk in bytes.chunks_exact_mut(S::WIDTH) {
        let sample = S::read(chunk, order).to_i64();
        S::saturating_from_i64(f(sample)).write(chunk, order);
    }
}

/// Decodes every whole sample of `bytes` into a vector.
pub fn decode_samples(bytes: &[u8], depth: BitDepth, order: ByteOrder) -> Vec<i32> {
    let mut out = Vec::with_capacity(bytes.len() / depth.bytes());
    for_each_sample(bytes, depth, order, |s| out.push(s as i32));
    out
}
