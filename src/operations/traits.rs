//! Core trait definitions for container operations.
//!
//! Each trait covers one concern and is implemented for [`WavContainer`](crate::WavContainer)
//! in its own module. All of them read and write the container's sound data through the
//! sample codec, so they work at every supported bit depth without converting the buffer
//! first.

use std::time::Duration;

use super::types::{Envelope, FilterResponse};
use crate::WavResult;

/// Level measurement over the decoded samples.
///
/// Levels are reported relative to the depth's full scale, `2^(bits-1) - 1`, which is
/// 0 dBFS.
pub trait WavStatistics {
    /// Returns the peak (maximum absolute value) over every sample of every channel.
    ///
    /// A trailing partial sample is ignored. Empty sound data has a peak of 0.
    ///
    /// # Errors
    ///
    /// [`WavError::UnsupportedBitDepth`](crate::WavError::UnsupportedBitDepth) if the
    /// container's depth has no codec.
    fn peak_amplitude(&self) -> WavResult<u32>;

    /// Returns the peak level in dBFS, `20·log10(peak / full_scale)`.
    ///
    /// Digital silence yields `f64::NEG_INFINITY`.
    ///
    /// # Errors
    ///
    /// [`WavError::EmptyBuffer`](crate::WavError::EmptyBuffer) if there is no sound data.
    fn peak_db(&self) -> WavResult<f64>;

    /// Returns the peak of each channel, in channel order.
    ///
    /// # Errors
    ///
    /// [`WavError::UnsupportedBitDepth`](crate::WavError::UnsupportedBitDepth) if the
    /// container's depth has no codec.
    fn channel_peaks(&self) -> WavResult<Vec<u32>>;

    /// Returns the root-mean-square level in dBFS.
    ///
    /// # Errors
    ///
    /// [`WavError::EmptyBuffer`](crate::WavError::EmptyBuffer) if there is no sound data.
    fn rms_db(&self) -> WavResult<f64>;
}

/// Gain changes applied in place.
pub trait WavProcessing {
    /// Rescales every sample so the peak lands on `target_db` dBFS.
    ///
    /// Targets above 0 dBFS are capped at 0 dBFS. Each sample `s` becomes
    /// `round(T · s / P)` where `P` is the current peak and `T` the target peak amplitude.
    ///
    /// # Errors
    ///
    /// - [`WavError::EmptyBuffer`](crate::WavError::EmptyBuffer) if there is no sound data or
    ///   it is silent.
    /// - [`WavError::InvalidParameter`](crate::WavError::InvalidParameter) if `target_db` is NaN.
    fn normalize_to(&mut self, target_db: f64) -> WavResult<()>;

    /// Multiplies every sample by `10^(gain_db/20)`, clamping at full scale.
    ///
    /// # Errors
    ///
    /// [`WavError::InvalidParameter`](crate::WavError::InvalidParameter) if `gain_db` is NaN
    /// or positive infinity.
    fn apply_gain_db(&mut self, gain_db: f64) -> WavResult<()>;
}

/// Single-pole IIR filtering, applied per channel in time order.
pub trait WavFiltering {
    /// Applies a one-pole filter with the given response and cutoff.
    ///
    /// Empty sound data is left untouched.
    ///
    /// # Errors
    ///
    /// [`WavError::InvalidParameter`](crate::WavError::InvalidParameter) if `cutoff_hz` is not
    /// a positive finite frequency.
    fn apply_filter(&mut self, response: FilterResponse, cutoff_hz: f64) -> WavResult<()>;

    /// Attenuates content above `cutoff_hz`.
    ///
    /// # Errors
    ///
    /// See [`apply_filter`](WavFiltering::apply_filter).
    fn low_pass(&mut self, cutoff_hz: f64) -> WavResult<()> {
        self.apply_filter(FilterResponse::LowPass, cutoff_hz)
    }

    /// Attenuates content below `cutoff_hz`.
    ///
    /// # Errors
    ///
    /// See [`apply_filter`](WavFiltering::apply_filter).
    fn high_pass(&mut self, cutoff_hz: f64) -> WavResult<()> {
        self.apply_filter(FilterResponse::HighPass, cutoff_hz)
    }
}

/// Tone synthesis that replaces the sound data.
pub trait WavSynthesis {
    /// Replaces the sound data with a sine at `frequency` Hz on every channel.
    ///
    /// The new buffer holds exactly `floor(sample_rate × duration)` frames. The peak
    /// amplitude is `10^(db/20)` of full scale, with `db` capped at 0.
    ///
    /// # Errors
    ///
    /// - [`WavError::InvalidParameter`](crate::WavError::InvalidParameter) for a negative or
    ///   non-finite frequency, a NaN or `+∞` level, or an invalid envelope.
    /// - [`WavError::SizeOverflow`](crate::WavError::SizeOverflow) if the buffer would not
    ///   fit a RIFF container.
    /// - [`WavError::AllocationFailure`](crate::WavError::AllocationFailure) if the buffer
    ///   cannot be reserved.
    fn write_sine(
        &mut self,
        frequency: f64,
        duration: Duration,
        db: f64,
        envelope: Envelope,
    ) -> WavResult<()>;

    /// Replaces the sound data with a binaural beat: `freq1` on even-indexed channels and
    /// `freq2` on odd-indexed channels.
    ///
    /// # Errors
    ///
    /// See [`write_sine`](WavSynthesis::write_sine).
    fn write_binaural(
        &mut self,
        freq1: f64,
        freq2: f64,
        duration: Duration,
        db: f64,
        envelope: Envelope,
    ) -> WavResult<()>;
}
