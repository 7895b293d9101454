//! Level and timing conversions shared by the container operations.
//!
//! ```rust
//! use riff_pcm::audio_math::{amplitude_to_db, db_to_amplitude};
//!
//! assert_eq!(amplitude_to_db(1.0_f64), 0.0);
//! assert!((amplitude_to_db(0.5_f64) + 6.0206).abs() < 1e-4);
//! assert!((db_to_amplitude(-20.0_f64) - 0.1).abs() < 1e-12);
//! ```

use std::time::Duration;

use num_traits::Float;

use crate::{WavError, WavResult};

/// Converts a linear amplitude ratio to decibels, `20·log10(amplitude)`.
///
/// Zero maps to negative infinity; there is no floor.
pub fn amplitude_to_db<F: Float>(amplitude: F) -> F {
    if amplitude > F::zero() {
        twenty::<F>() * amplitude.log10()
    } else {
        F::neg_infinity()
    }
}

/// Converts decibels to a linear amplitude ratio, `10^(db/20)`.
pub fn db_to_amplitude<F: Float>(db: F) -> F {
    ten::<F>().powf(db / twenty::<F>())
}

/// Converts a power ratio to decibels, `10·log10(power)`.
pub fn power_to_db<F: Float>(power: F) -> F {
    if power > F::zero() {
        ten::<F>() * power.log10()
    } else {
        F::neg_infinity()
    }
}

/// Number of whole frames that fit in `duration` at `sample_rate`, `floor(rate × secs)`.
///
/// The product is computed in integer nanoseconds, so durations that are an exact number
/// of frames never lose a frame to float rounding.
///
/// # Errors
///
/// [`WavError::SizeOverflow`] if the frame count does not fit in `usize`.
pub fn frames_for_duration(sample_rate: u32, duration: Duration) -> WavResult<usize> {
    let frames = u128::from(sample_rate) * duration.as_nanos() / 1_000_000_000;
    usize::try_from(frames)
        .map_err(|_| WavError::SizeOverflow(frames.min(u128::from(u64::MAX)) as u64))
}

#[inline]
fn ten<F: Float>() -> F {
    F::from(10.0).unwrap_or_else(F::one)
}

#[inline]
fn twenty<F: Float>() -> F {
    F::from(20.0).unwrap_or_else(F::one)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_amplitude_db_conversions() {
        assert_eq!(amplitude_to_db(1.0_f64), 0.0);
        assert_approx_eq!(amplitude_to_db(0.1_f64), -20.0, 1e-9);
        assert_approx_eq!(amplitude_to_db(0.5_f32) as f64, -6.0206, 1e-4);
        assert_eq!(amplitude_to_db(0.0_f64), f64::NEG_INFINITY);
        assert_eq!(amplitude_to_db(-1.0_f64), f64::NEG_INFINITY);

        assert_approx_eq!(db_to_amplitude(0.0_f64), 1.0, 1e-12);
        assert_approx_eq!(db_to_amplitude(-6.0_f64), 0.501_187_233_627_272_2, 1e-9);
        assert_approx_eq!(db_to_amplitude(amplitude_to_db(0.3_f64)), 0.3, 1e-9);
    }

    #[test]
    fn test_power_to_db() {
        assert_approx_eq!(power_to_db(0.5_f64), -3.0103, 1e-4);
        assert_eq!(power_to_db(0.0_f64), f64::NEG_INFINITY);
    }

    #[test]
    fn test_frames_for_duration() {
        assert_eq!(frames_for_duration(44_100, Duration::from_secs(1)).unwrap(), 44_100);
        assert_eq!(frames_for_duration(44_100, Duration::from_millis(500)).unwrap(), 22_050);
        // 8000 × 0.0001255 s = 1.004 frames
        assert_eq!(frames_for_duration(8_000, Duration::from_nanos(125_500)).unwrap(), 1);
        assert_eq!(frames_for_duration(48_000, Duration::ZERO).unwrap(), 0);
    }
}
