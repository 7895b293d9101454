// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)] // Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release

//! # riff_pcm
//!
//! Chunk-preserving RIFF/WAVE decoding and encoding, with in-place PCM transforms that work
//! at 8, 16, 24 and 32 bits per sample.
//!
//! A [`WavContainer`] holds one `fmt ` descriptor, the raw `data` bytes and every other
//! chunk of the file in the order it was read. Writing a container reproduces those chunks
//! and recomputes every size field, so a read/write cycle never loses metadata.
//!
//! ## Features
//!
//! Operations are grouped into traits, each behind a Cargo feature (all enabled by
//! default):
//!
//! - `statistics`: [`WavStatistics`] (peak, dBFS, RMS, per-channel peaks)
//! - `processing`: [`WavProcessing`] (normalize to a dB target, gain)
//! - `filtering`: [`WavFiltering`] (one-pole low-pass and high-pass)
//! - `synthesis`: [`WavSynthesis`] (sine and binaural tones with optional ADSR)
//!
//! ## Error Handling
//!
//! Every fallible call returns [`WavResult`]. Errors carry enough context to tell a
//! malformed file from an I/O failure:
//!
//! ```rust
//! use riff_pcm::{WavContainer, WavError};
//!
//! match WavContainer::from_bytes(b"RIFF\x04\x00\x00\x00AVI ") {
//!     Err(WavError::NotWaveFile { found }) => println!("not a WAVE file: {found}"),
//!     Err(WavError::TruncatedData { chunk, .. }) => println!("{chunk} was cut short"),
//!     Err(other) => println!("failed: {other}"),
//!     Ok(_) => unreachable!(),
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use riff_pcm::{Envelope, WavContainer, WavProcessing, WavStatistics, WavSynthesis};
//!
//! # fn main() -> riff_pcm::WavResult<()> {
//! let mut wav = WavContainer::new(2, 44_100, 16)?;
//! wav.write_sine(174.0, Duration::from_secs(1), -6.0, Envelope::None)?;
//! assert_eq!(wav.sound_data().len(), 176_400);
//!
//! wav.normalize_to(-16.0)?;
//! assert!((wav.peak_db()? + 16.0).abs() < 0.5);
//!
//! let bytes = wav.to_bytes()?;
//! let decoded = WavContainer::from_bytes(&bytes)?;
//! assert_eq!(decoded, wav);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (chunk parsing at `debug`, recoverable
//! inconsistencies at `warn`, operation parameters at `trace`) and never installs a
//! subscriber itself.

mod chunks;
mod codec;
mod error;
mod io;
mod repr;

/// Core traits for PCM sample types.
pub mod traits;

pub mod operations;
pub mod utils;

pub use crate::chunks::{
    AuxiliaryChunk, ChunkId, DATA_CHUNK, FMT_BODY_SIZE, FMT_CHUNK, FormatDescriptor, PCM_FORMAT,
    RIFF_CHUNK, RIFX_CHUNK, WAVE_CHUNK,
};
pub use crate::codec::{
    BitDepth, ByteOrder, SampleBytes, decode_sample, decode_sample_ordered, decode_samples,
    encode_sample, encode_sample_into, for_each_sample, map_samples_in_place,
};
pub use crate::error::{WavError, WavResult};
pub use crate::io::{ReadOptions, read_wav, read_wav_with_options, write_wav};
pub use crate::repr::WavContainer;
pub use crate::traits::PcmSample;

pub use crate::operations::{AdsrEnvelope, Envelope, FilterResponse};

#[cfg(feature = "statistics")]
pub use crate::operations::WavStatistics;

#[cfg(feature = "processing")]
pub use crate::operations::WavProcessing;

#[cfg(feature = "filtering")]
pub use crate::operations::{OnePoleFilter, WavFiltering};

#[cfg(feature = "synthesis")]
pub use crate::operations::WavSynthesis;

pub use crate::utils::audio_math::{
    self, amplitude_to_db, db_to_amplitude, frames_for_duration, power_to_db,
};

pub use i24::I24; // Re-export I24 type that has the PcmSample implementation
