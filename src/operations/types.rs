//! Supporting types for container operations.

use crate::{WavError, WavResult};

/// Which side of the cutoff a one-pole filter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterResponse {
    /// Passes content below the cutoff.
    LowPass,
    /// Passes content above the cutoff.
    HighPass,
}

/// Amplitude shaping applied over the length of a synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Envelope {
    /// Constant amplitude.
    #[default]
    None,
    /// Attack-decay-sustain-release shaping.
    Adsr(AdsrEnvelope),
}

impl Envelope {
    /// The standard ADSR shape, see [`AdsrEnvelope::default`].
    pub fn adsr() -> Self {
        Envelope::Adsr(AdsrEnvelope::default())
    }

    /// Gain at `position`, the elapsed fraction of the tone in `[0, 1]`.
    pub fn gain_at(&self, position: f64) -> f64 {
        match self {
            Envelope::None => 1.0,
            Envelope::Adsr(adsr) => adsr.gain_at(position),
        }
    }

    pub(crate) fn validate(&self) -> WavResult<()> {
        match self {
            Envelope::None => Ok(()),
            Envelope::Adsr(adsr) => adsr.validate(),
        }
    }
}

/// Piecewise-linear ADSR envelope with phases expressed as fractions of the tone length.
///
/// The gain ramps 0 → 1 over `attack`, falls 1 → `sustain_level` over `decay`, holds until
/// the final `release` fraction and then falls to 0 at the end of the tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrEnvelope {
    /// Fraction of the tone spent rising to full gain.
    pub attack: f64,
    /// Fraction of the tone spent falling to the sustain level.
    pub decay: f64,
    /// Gain held between decay and release, in `[0, 1]`.
    pub sustain_level: f64,
    /// Fraction of the tone spent falling to silence.
    pub release: f64,
}

impl Default for AdsrEnvelope {
    /// 10 % attack, 40 % decay to 0.7, sustain, 10 % release.
    fn default() -> Self {
        AdsrEnvelope {
            attack: 0.1,
            decay: 0.4,
            sustain_level: 0.7,
            release: 0.1,
        }
    }
}

impl AdsrEnvelope {
    /// Gain at `position`, the elapsed fraction of the tone. Positions outside `[0, 1]` are
    /// clamped.
    pub fn gain_at(&self, position: f64) -> f64 {
        let t = position.clamp(0.0, 1.0);
        let decay_end = self.attack + self.decay;
        let release_start = 1.0 - self.release;

        if t < self.attack {
            t / self.attack
        } else if t < decay_end {
            1.0 - (1.0 - self.sustain_level) * (t - self.attack) / self.decay
        } else if t < release_start {
            self.sustain_level
        } else if self.release > 0.0 {
            self.sustain_level * (1.0 - (t - release_start) / self.release)
        } else {
            self.sustain_level
        }
    }

    pub(crate) fn validate(&self) -> WavResult<()> {
        let phases = [self.attack, self.decay, self.release];
        if phases.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(WavError::invalid_parameter(
                "envelope phases must be finite, non-negative fractions",
            ));
        }
        if self.attack + self.decay + self.release > 1.0 {
            return Err(WavError::invalid_parameter(format!(
                "envelope phases sum to {}, more than the whole tone",
                self.attack + self.decay + self.release
            )));
        }
        if !(0.0..=1.0).contains(&self.sustain_level) {
            return Err(WavError::invalid_parameter(format!(
                "sustain level {} is outside [0, 1]",
                self.sustain_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_default_adsr_shape() {
        let adsr = AdsrEnvelope::default();
        assert_eq!(adsr.gain_at(0.0), 0.0);
        assert_approx_eq!(adsr.gain_at(0.05), 0.5, 1e-9);
        assert_approx_eq!(adsr.gain_at(0.1), 1.0, 1e-9);
        assert_approx_eq!(adsr.gain_at(0.3), 0.85, 1e-9);
        assert_approx_eq!(adsr.gain_at(0.5), 0.7, 1e-9);
        assert_approx_eq!(adsr.gain_at(0.75), 0.7, 1e-9);
        assert_approx_eq!(adsr.gain_at(0.9), 0.7, 1e-9);
        assert_approx_eq!(adsr.gain_at(0.95), 0.35, 1e-9);
        assert!(adsr.gain_at(1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gain_never_leaves_unit_range() {
        let adsr = AdsrEnvelope::default();
        for i in 0..=1000 {
            let gain = adsr.gain_at(i as f64 / 1000.0);
            assert!((0.0..=1.0).contains(&gain), "gain {gain} at step {i}");
        }
    }

    #[test]
    fn test_flat_envelope() {
        assert_eq!(Envelope::None.gain_at(0.0), 1.0);
        assert_eq!(Envelope::default().gain_at(0.999), 1.0);
    }

    #[test]
    fn test_envelope_validation() {
        assert!(Envelope::adsr().validate().is_ok());
        let too_long = AdsrEnvelope {
            attack: 0.5,
            decay: 0.4,
            sustain_level: 0.7,
            release: 0.2,
        };
        assert!(Envelope::Adsr(too_long).validate().is_err());
        let loud_sustain = AdsrEnvelope {
            sustain_level: 1.5,
            ..AdsrEnvelope::default()
        };
        assert!(loud_sustain.validate().is_err());
        let negative = AdsrEnvelope {
            attack: -0.1,
            ..AdsrEnvelope::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_zero_length_phases() {
        let gate = AdsrEnvelope {
            attack: 0.0,
            decay: 0.0,
            sustain_level: 1.0,
            release: 0.0,
        };
        assert_eq!(gate.gain_at(0.0), 1.0);
        assert_eq!(gate.gain_at(1.0), 1.0);
    }
}
