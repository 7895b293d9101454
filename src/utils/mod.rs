//! Utility functions shared across the crate.
//!
//! - [`audio_math`] - decibel and duration conversions

pub mod audio_math;

pub use audio_math::*;
