//! Chunk identifiers and the two chunk bodies the container interprets.
//!
//! Everything that is neither `fmt ` nor `data` is carried through as an
//! [`AuxiliaryChunk`]: an opaque tag and payload that is written back exactly as read.

use core::fmt::{Debug, Display, Formatter, Result as FmtResult};

use tracing::warn;

use crate::codec::{BitDepth, ByteOrder};
use crate::{WavError, WavResult};

/// `audio_format` tag for linear PCM.
pub const PCM_FORMAT: u16 = 1;

/// Size of the `fmt ` body this crate writes.
pub const FMT_BODY_SIZE: usize = 16;

/// A four-character chunk tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId([u8; 4]);

/// Little-endian container header tag.
pub const RIFF_CHUNK: ChunkId = ChunkId(*b"RIFF");
/// Big-endian container header tag.
pub const RIFX_CHUNK: ChunkId = ChunkId(*b"RIFX");
/// Form type following the container header.
pub const WAVE_CHUNK: ChunkId = ChunkId(*b"WAVE");
/// Format descriptor chunk tag.
pub const FMT_CHUNK: ChunkId = ChunkId(*b"fmt ");
/// Sound data chunk tag.
pub const DATA_CHUNK: ChunkId = ChunkId(*b"data");

impl ChunkId {
    /// Wraps four raw tag bytes.
    pub const fn new(id: [u8; 4]) -> Self {
        ChunkId(id)
    }

    /// The raw tag bytes.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Whether this tag opens a container (`RIFF` or `RIFX`).
    pub fn is_container_header(&self) -> bool {
        *self == RIFF_CHUNK || *self == RIFX_CHUNK
    }
}

impl From<[u8; 4]> for ChunkId {
    fn from(id: [u8; 4]) -> Self {
        ChunkId(id)
    }
}

impl Display for ChunkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // Tags are usually ASCII; escape anything else so logs stay readable.
        write!(f, "\"")?;
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        write!(f, "\"")
    }
}

impl Debug for ChunkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "ChunkId({self})")
    }
}

/// Contents of the `fmt ` chunk.
///
/// Only the three independent fields are stored; `byte_rate` and `block_align` are always
/// derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    audio_format: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

impl FormatDescriptor {
    /// Creates a linear PCM descriptor.
    ///
    /// # Errors
    ///
    /// [`WavError::InvalidFormat`] if `channels` or `sample_rate` is zero, or
    /// `bits_per_sample` is not a positive multiple of eight.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> WavResult<Self> {
        if channels == 0 {
            return Err(WavError::invalid_format("channel count must be at least 1"));
        }
        if sample_rate == 0 {
            return Err(WavError::invalid_format("sample rate must be greater than 0"));
        }
        if bits_per_sample == 0 || bits_per_sample % 8 != 0 {
            return Err(WavError::invalid_format(format!(
                "bits per sample must be a positive multiple of 8, got {bits_per_sample}"
            )));
        }
        let descriptor = FormatDescriptor {
            audio_format: PCM_FORMAT,
            channels,
            sample_rate,
            bits_per_sample,
        };
        // Derived fields must fit their on-disk widths.
        if descriptor.block_align_wide() > u16::MAX as u64
            || descriptor.byte_rate_wide() > u32::MAX as u64
        {
            return Err(WavError::invalid_format(format!(
                "{channels} channels at {sample_rate} Hz and {bits_per_sample} bits overflow the fmt chunk"
            )));
        }
        Ok(descriptor)
    }

    /// Parses a `fmt ` body of at least 16 bytes.
    ///
    /// The stored `byte_rate` and `block_align` are checked against the derived values and
    /// discarded; a mismatch is logged, not rejected.
    ///
    /// # Errors
    ///
    /// [`WavError::InvalidFormat`] for a short body, a non-PCM `audio_format`, or field values
    /// [`FormatDescriptor::pcm`] rejects.
    pub fn from_bytes(body: &[u8], order: ByteOrder) -> WavResult<Self> {
        if body.len() < FMT_BODY_SIZE {
            return Err(WavError::invalid_format(format!(
                "fmt chunk body is {} bytes, at least {FMT_BODY_SIZE} required",
                body.len()
            )));
        }
        let audio_format = order.u16_from([body[0], body[1]]);
        let channels = order.u16_from([body[2], body[3]]);
        let sample_rate = order.u32_from([body[4], body[5], body[6], body[7]]);
        let byte_rate = order.u32_from([body[8], body[9], body[10], body[11]]);
        let block_align = order.u16_from([body[12], body[13]]);
        let bits_per_sample = order.u16_from([body[14], body[15]]);

        if audio_format != PCM_FORMAT {
            return Err(WavError::invalid_format(format!(
                "audio format {audio_format:#06x} is not linear PCM"
            )));
        }

        let descriptor = FormatDescriptor::pcm(channels, sample_rate, bits_per_sample)?;
        if descriptor.byte_rate() != byte_rate || descriptor.block_align() != block_align {
            warn!(
                stored_byte_rate = byte_rate,
                stored_block_align = block_align,
                byte_rate = descriptor.byte_rate(),
                block_align = descriptor.block_align(),
                "fmt chunk carries inconsistent derived fields, recomputing"
            );
        }
        Ok(descriptor)
    }

    /// Serializes the 16-byte `fmt ` body.
    pub fn to_bytes(&self, order: ByteOrder) -> [u8; FMT_BODY_SIZE] {
        let mut body = [0u8; FMT_BODY_SIZE];
        body[0..2].copy_from_slice(&order.u16_bytes(self.audio_format));
        body[2..4].copy_from_slice(&order.u16_bytes(self.channels));
        body[4..8].copy_from_slice(&order.u32_bytes(self.sample_rate));
        body[8..12].copy_from_slice(&order.u32_bytes(self.byte_rate()));
        body[12..14].copy_from_slice(&order.u16_bytes(self.block_align()));
        body[14..16].copy_from_slice(&order.u16_bytes(self.bits_per_sample));
        body
    }

    /// Format tag; always [`PCM_FORMAT`] for descriptors this crate builds or accepts.
    pub const fn audio_format(&self) -> u16 {
        self.audio_format
    }

    /// Number of interleaved channels.
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    /// Frames per second.
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bits per sample.
    pub const fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Bytes per sample.
    pub const fn bytes_per_sample(&self) -> usize {
        self.bits_per_sample as usize / 8
    }

    /// `sample_rate × channels × bytes_per_sample`.
    pub const fn byte_rate(&self) -> u32 {
        self.byte_rate_wide() as u32
    }

    /// `channels × bytes_per_sample`; the size of one frame.
    pub const fn block_align(&self) -> u16 {
        self.block_align_wide() as u16
    }

    /// The sample codec for this descriptor's depth.
    ///
    /// # Errors
    ///
    /// [`WavError::UnsupportedBitDepth`] for depths other than 8, 16, 24 and 32.
    pub fn bit_depth(&self) -> WavResult<BitDepth> {
        BitDepth::from_bits(self.bits_per_sample)
    }

    const fn byte_rate_wide(&self) -> u64 {
        self.sample_rate as u64 * self.block_align_wide()
    }

    const fn block_align_wide(&self) -> u64 {
        self.channels as u64 * (self.bits_per_sample as u64 / 8)
    }
}

/// A chunk the container does not interpret, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuxiliaryChunk {
    id: ChunkId,
    data: Vec<u8>,
}

impl AuxiliaryChunk {
    /// Creates an auxiliary chunk from its tag and payload.
    pub fn new(id: impl Into<ChunkId>, data: Vec<u8>) -> Self {
        AuxiliaryChunk {
            id: id.into(),
            data,
        }
    }

    /// The chunk tag.
    pub const fn id(&self) -> ChunkId {
        self.id
    }

    /// Payload length in bytes, excluding the header and any pad byte.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the chunk, returning its payload.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// On-disk footprint of a chunk with a payload of `len` bytes: header, payload and the pad
/// byte that keeps the next chunk word-aligned.
pub(crate) const fn chunk_footprint(len: u64) -> u64 {
    8 + len + (len & 1)
}
