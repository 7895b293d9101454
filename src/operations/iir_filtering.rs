//! Single-pole IIR filters.
//!
//! Each channel runs its own [`OnePoleFilter`] over its samples in time order. Samples
//! are scaled to `±1.0` before filtering, then re-quantized with `f64::round` and clamped
//! to the container's bit depth.

use std::f64::consts::PI;

use super::traits::WavFiltering;
use super::types::FilterResponse;
use crate::codec::map_samples_in_place;
use crate::{WavContainer, WavError, WavResult};

/// A one-pole RC filter with its running state.
///
/// The first processed sample primes the state and passes through unchanged, so a filter
/// never starts from an implicit run of zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct OnePoleFilter {
    response: FilterResponse,
    alpha: f64,
    prev_in: f64,
    prev_out: f64,
    primed: bool,
}

impl OnePoleFilter {
    /// Designs a filter for `cutoff_hz` at `sample_rate`.
    ///
    /// With `rc = 1/(2π·cutoff)` and `dt = 1/sample_rate`, a low-pass uses
    /// `alpha = dt/(rc+dt)` and a high-pass `alpha = rc/(rc+dt)`.
    ///
    /// # Errors
    ///
    /// [`WavError::InvalidParameter`] if `cutoff_hz` is not positive and finite, or
    /// `sample_rate` is zero.
    pub fn new(response: FilterResponse, cutoff_hz: f64, sample_rate: u32) -> WavResult<Self> {
        if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 {
            return Err(WavError::invalid_parameter(format!(
                "cutoff must be a positive frequency, got {cutoff_hz}"
            )));
        }
        if sample_rate == 0 {
            return Err(WavError::invalid_parameter("sample rate must be non-zero"));
        }

        let rc = 1.0 / (2.0 * PI * cutoff_hz);
        let dt = 1.0 / sample_rate as f64;
        let alpha = match response {
            FilterResponse::LowPass => dt / (rc + dt),
            FilterResponse::HighPass => rc / (rc + dt),
        };
        Ok(OnePoleFilter {
            response,
            alpha,
            prev_in: 0.0,
            prev_out: 0.0,
            primed: false,
        })
    }

    /// The smoothing coefficient.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The filter's response.
    pub fn response(&self) -> FilterResponse {
        self.response
    }

    /// Filters one sample.
    pub fn process_sample(&mut self, input: f64) -> f64 {
        if !self.primed {
            self.primed = true;
            self.prev_in = input;
            self.prev_out = input;
            return input;
        }

        let output = match self.response {
            FilterResponse::LowPass => self.alpha * input + (1.0 - self.alpha) * self.prev_out,
            FilterResponse::HighPass => self.alpha * (self.prev_out + input - self.prev_in),
        };
        self.prev_in = input;
        self.prev_out = output;
        output
    }

    /// Filters `samples` in place.
    pub fn process_samples_in_place(&mut self, samples: &mut [f64]) {
        for sample in samples {
            *sample = self.process_sample(*sample);
        }
    }

    /// Clears the state; the next sample primes the filter again.
    pub fn reset(&mut self) {
        self.prev_in = 0.0;
        self.prev_out = 0.0;
        self.primed = false;
    }
}

impl WavFiltering for WavContainer {
    fn apply_filter(&mut self, response: FilterResponse, cutoff_hz: f64) -> WavResult<()> {
        let template = OnePoleFilter::new(response, cutoff_hz, self.format().sample_rate())?;
        let channels = self.format().channels() as usize;
        if self.sound_data().is_empty() || channels == 0 {
            return Ok(());
        }

        let depth = self.bit_depth()?;
        let order = self.byte_order();
        let full_scale = depth.full_scale();
        let whole = self.frame_count() * self.format().block_align() as usize;
        tracing::trace!(
            ?response,
            cutoff_hz,
            alpha = template.alpha(),
            channels,
            "applying one-pole filter"
        );

        let mut filters = vec![template; channels];
        let mut index = 0usize;
        map_samples_in_place(&mut self.sound_data_mut()[..whole], depth, order, |s| {
            let filter = &mut filters[index % channels];
            index += 1;
            let out = filter.process_sample(s as f64 / full_scale);
            (out * full_scale).round() as i64
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_samples, encode_sample};
    use approx_eq::assert_approx_eq;

    fn container(channels: u16, bits: u16, rate: u32, samples: &[i64]) -> WavContainer {
        let mut wav = WavContainer::new(channels, rate, bits).unwrap();
        let depth = wav.bit_depth().unwrap();
        let data = samples
            .iter()
            .flat_map(|&s| encode_sample(s, depth).as_ref().to_vec())
            .collect();
        wav.set_sound_data(data).unwrap();
        wav
    }

    fn samples(wav: &WavContainer) -> Vec<i32> {
        decode_samples(
            wav.sound_data(),
            wav.bit_depth().unwrap(),
            wav.byte_order(),
        )
    }

    #[test]
    fn test_filter_coefficients() {
        let rate = 44_100;
        let low = OnePoleFilter::new(FilterResponse::LowPass, 1_000.0, rate).unwrap();
        let high = OnePoleFilter::new(FilterResponse::HighPass, 1_000.0, rate).unwrap();
        let rc = 1.0 / (2.0 * PI * 1_000.0);
        let dt = 1.0 / rate as f64;
        assert_approx_eq!(low.alpha(), dt / (rc + dt), 1e-12);
        assert_approx_eq!(high.alpha(), rc / (rc + dt), 1e-12);
        assert_approx_eq!(low.alpha() + high.alpha(), 1.0, 1e-12);
    }

    #[test]
    fn test_invalid_cutoff() {
        for cutoff in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                OnePoleFilter::new(FilterResponse::LowPass, cutoff, 44_100),
                Err(WavError::InvalidParameter(_))
            ));
        }
        let mut wav = container(1, 16, 8_000, &[1, 2, 3]);
        assert!(wav.high_pass(0.0).is_err());
        assert_eq!(samples(&wav), vec![1, 2, 3]);
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = OnePoleFilter::new(FilterResponse::HighPass, 100.0, 8_000).unwrap();
        assert_eq!(filter.process_sample(0.25), 0.25);
        filter.reset();
        assert_eq!(filter.process_sample(-0.5), -0.5);
    }

    #[test]
    fn test_low_pass_keeps_dc() {
        let mut wav = container(2, 16, 44_100, &[10_000, -3_000].repeat(200));
        wav.low_pass(30.0).unwrap();
        for pair in samples(&wav).chunks(2) {
            assert_eq!(pair, &[10_000, -3_000]);
        }
    }

    #[test]
    fn test_high_pass_removes_dc() {
        let mut wav = container(1, 16, 44_100, &[20_000; 2_000]);
        wav.high_pass(2_200.0).unwrap();
        let out = samples(&wav);
        assert_eq!(out[0], 20_000);
        assert!(out[1] < 20_000);
        assert!(out[1_999].abs() <= 1, "residual {}", out[1_999]);
    }

    #[test]
    fn test_low_pass_smooths_and_stays_in_range() {
        let square: Vec<i64> = (0..1_000)
            .map(|i| if (i / 20) % 2 == 0 { 127 } else { -128 })
            .collect();
        let mut wav = container(1, 8, 8_000, &square);
        wav.low_pass(200.0).unwrap();
        let out = samples(&wav);
        assert!(out.iter().all(|s| (-128..=127).contains(s)));
        // The first edge is rounded off rather than passed as a step.
        assert!(out[21] > -128 && out[21] < 127);
    }

    #[test]
    fn test_channels_filtered_independently() {
        let mut interleaved = Vec::new();
        for i in 0..400 {
            interleaved.push(0);
            interleaved.push(if i == 0 { 0 } else { 1_000_000 });
        }
        let mut wav = container(2, 24, 48_000, &interleaved);
        wav.low_pass(500.0).unwrap();
        let out = samples(&wav);
        assert!(out.iter().step_by(2).all(|&s| s == 0));
        assert!(out[3] > 0 && out[3] < 1_000_000);
    }

    #[test]
    fn test_empty_data_is_a_no_op() {
        let mut wav = WavContainer::new(2, 44_100, 16).unwrap();
        wav.low_pass(30.0).unwrap();
        wav.high_pass(2_200.0).unwrap();
        assert!(wav.sound_data().is_empty());
    }
}
