//! Operations on a decoded container.
//!
//! Each concern is a trait implemented for [`WavContainer`](crate::WavContainer), gated by
//! the Cargo feature of the same area:
//!
//! - [`traits`] - core trait definitions
//! - [`statistics`] - peak and RMS levels (`statistics`)
//! - [`processing`] - normalization and gain (`processing`)
//! - [`iir_filtering`] - one-pole low-pass and high-pass filters (`filtering`)
//! - [`generation`] - sine and binaural synthesis (`synthesis`)
//! - [`types`] - supporting types and enums
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use riff_pcm::WavContainer;
//! use riff_pcm::operations::*;
//!
//! # fn example() -> riff_pcm::WavResult<()> {
//! let mut wav = WavContainer::new(2, 44_100, 16)?;
//! wav.write_sine(174.0, Duration::from_secs(1), -6.0, Envelope::None)?;
//! wav.normalize_to(-16.0)?;
//! wav.low_pass(30.0)?;
//! let level = wav.peak_db()?;
//! # let _ = level;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod traits;
pub mod types;

#[cfg(feature = "synthesis")]
pub mod generation;
#[cfg(feature = "filtering")]
pub mod iir_filtering;
#[cfg(feature = "processing")]
pub mod processing;
#[cfg(feature = "statistics")]
pub mod statistics;

pub use traits::{WavFiltering, WavProcessing, WavStatistics, WavSynthesis};
pub use types::{AdsrEnvelope, Envelope, FilterResponse};

#[cfg(feature = "filtering")]
pub use iir_filtering::OnePoleFilter;
