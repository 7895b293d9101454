//! Error types and result utilities for WAVE container and sample operations.

use std::io;

use thiserror::Error;

use crate::chunks::ChunkId;

/// Convenience type alias for results that may contain a [`WavError`].
pub type WavResult<T> = Result<T, WavError>;

/// Error types that can occur while decoding, encoding or transforming a WAVE container.
#[derive(Error, Debug)]
pub enum WavError {
    /// Construction or `fmt ` chunk parameters are not usable.
    ///
    /// Raised for zero channels, a zero sample rate, a bit depth that is not a positive
    /// multiple of eight, a non-PCM format tag, or a chunk length above the configured limit.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The stream does not start with a `RIFF`/`RIFX` header carrying the `WAVE` marker.
    #[error("Not a WAVE file: found {found}")]
    NotWaveFile {
        /// The four bytes found where the marker was expected.
        found: ChunkId,
    },

    /// A chunk declares more bytes than the stream holds.
    #[error("Truncated {chunk} chunk: expected {expected} bytes, only {available} available")]
    TruncatedData {
        /// Chunk being read when the stream ran out.
        chunk: ChunkId,
        /// Number of bytes the chunk declared.
        expected: usize,
        /// Number of bytes actually available.
        available: usize,
    },

    /// A buffer could not be reserved.
    #[error("Failed to allocate {requested} bytes")]
    AllocationFailure {
        /// Size of the rejected reservation.
        requested: usize,
    },

    /// The destination stream rejected a write or accepted fewer bytes than requested.
    #[error("Write failure: {0}")]
    WriteFailure(#[source] io::Error),

    /// The source stream reported an error other than end-of-stream.
    #[error("Read failure: {0}")]
    ReadFailure(#[source] io::Error),

    /// An operation that needs sound data found none, or found only silence where a
    /// non-zero peak is required.
    #[error("Sound data is empty")]
    EmptyBuffer,

    /// The bit depth is valid for the container but has no sample codec.
    #[error("Unsupported bit depth: {0} bits per sample (supported: 8, 16, 24, 32)")]
    UnsupportedBitDepth(u16),

    /// A mandatory chunk was not present in the stream.
    #[error("Missing mandatory {0} chunk")]
    MissingChunk(ChunkId),

    /// A chunk that must appear exactly once appeared again.
    #[error("Duplicate {0} chunk")]
    DuplicateChunk(ChunkId),

    /// An operation argument is out of its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A computed chunk or container size does not fit in the 32-bit RIFF size field.
    #[error("Size {0} does not fit in a 32-bit RIFF size field")]
    SizeOverflow(u64),
}

impl WavError {
    pub(crate) fn invalid_format(reason: impl Into<String>) -> Self {
        WavError::InvalidFormat(reason.into())
    }

    pub(crate) fn invalid_parameter(reason: impl Into<String>) -> Self {
        WavError::InvalidParameter(reason.into())
    }
}

