//! Tone synthesis for WavContainer.
//!
//! A synthesized tone replaces the whole sound-data buffer. The new buffer is reserved up
//! front at its exact final length and filled frame by frame in the container's byte order.

use std::f64::consts::PI;
use std::time::Duration;

use super::traits::WavSynthesis;
use super::types::Envelope;
use crate::codec::dispatch_depth;
use crate::traits::PcmSample;
use crate::utils::audio_math::{db_to_amplitude, frames_for_duration};
use crate::{ByteOrder, WavContainer, WavError, WavResult};

/// Header bytes every container carries besides its sound data and auxiliary chunks.
const FIXED_RIFF_OVERHEAD: u64 = 36;

fn check_frequency(frequency: f64) -> WavResult<()> {
    if !frequency.is_finite() || frequency < 0.0 {
        return Err(WavError::invalid_parameter(format!(
            "tone frequency must be finite and non-negative, got {frequency}"
        )));
    }
    Ok(())
}

fn check_level(db: f64) -> WavResult<()> {
    if db.is_nan() || db == f64::INFINITY {
        return Err(WavError::invalid_parameter(format!(
            "tone level of {db} dB is not usable"
        )));
    }
    Ok(())
}

/// Fills `buf` with `S`-encoded samples, visiting frames in time order and channels in
/// interleaved order.
fn fill_frames<S: PcmSample>(
    buf: &mut [u8],
    order: ByteOrder,
    channels: usize,
    mut sample_at: impl FnMut(usize, usize) -> i64,
) {
    for (index, slot) in buf.chunks_exact_mut(S::WIDTH).enumerate() {
        let value = sample_at(index / channels, index % channels);
        S::saturating_from_i64(value).write(slot, order);
    }
}

impl WavContainer {
    /// Replaces the sound data with one sine per channel, `frequencies[channel % 2]`.
    fn synthesize(
        &mut self,
        frequencies: [f64; 2],
        duration: Duration,
        db: f64,
        envelope: Envelope,
    ) -> WavResult<()> {
        frequencies.iter().try_for_each(|&f| check_frequency(f))?;
        check_level(db)?;
        envelope.validate()?;

        let depth = self.bit_depth()?;
        let order = self.byte_order();
        let sample_rate = self.format().sample_rate();
        let channels = self.format().channels() as usize;
        let block_align = self.format().block_align() as usize;

        let frames = frames_for_duration(sample_rate, duration)?;
        let len = frames
            .checked_mul(block_align)
            .ok_or(WavError::SizeOverflow(u64::MAX))?;
        let riff_size = FIXED_RIFF_OVERHEAD + len as u64 + (len as u64 & 1);
        if riff_size > u32::MAX as u64 {
            return Err(WavError::SizeOverflow(riff_size));
        }

        let amplitude = db_to_amplitude(db.min(0.0)) * depth.full_scale();
        tracing::trace!(
            ?frequencies,
            frames,
            len,
            amplitude,
            ?envelope,
            "synthesizing tone"
        );

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| WavError::AllocationFailure { requested: len })?;
        buf.resize(len, 0);

        let rate = sample_rate as f64;
        let total = frames as f64;
        let sample_at = |frame: usize, channel: usize| {
            let n = frame as f64;
            let gain = envelope.gain_at(n / total);
            let phase = 2.0 * PI * frequencies[channel % 2] * n / rate;
            (amplitude * gain * phase.sin()).round() as i64
        };
        dispatch_depth!(depth, S => fill_frames::<S>(&mut buf, order, channels, sample_at));

        self.set_sound_data(buf)
    }
}

impl WavSynthesis for WavContainer {
    fn write_sine(
        &mut self,
        frequency: f64,
        duration: Duration,
        db: f64,
        envelope: Envelope,
    ) -> WavResult<()> {
        self.synthesize([frequency, frequency], duration, db, envelope)
    }

    fn write_binaural(
        &mut self,
        freq1: f64,
        freq2: f64,
        duration: Duration,
        db: f64,
        envelope: Envelope,
    ) -> WavResult<()> {
        self.synthesize([freq1, freq2], duration, db, envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{AdsrEnvelope, WavStatistics};

    #[test]
    fn test_sine_sizing_every_depth() {
        for bits in [8u16, 16, 24, 32] {
            for channels in [1u16, 2] {
                let mut wav = WavContainer::new(channels, 8_000, bits).unwrap();
                wav.write_sine(440.0, Duration::from_millis(250), -3.0, Envelope::None)
                    .unwrap();
                let expected = 2_000 * channels as usize * bits as usize / 8;
                assert_eq!(wav.sound_data().len(), expected);
                assert_eq!(wav.riff_size().unwrap() as usize, 36 + expected);
            }
        }
    }

    #[test]
    fn test_sine_level() {
        let mut wav = WavContainer::new(1, 44_100, 16).unwrap();
        wav.write_sine(441.0, Duration::from_secs(1), -6.0, Envelope::None)
            .unwrap();
        let db = wav.peak_db().unwrap();
        assert!((db + 6.0).abs() < 0.01, "peak {db}");
    }

    #[test]
    fn test_sine_starts_at_zero_and_channels_match() {
        let mut wav = WavContainer::new(2, 8_000, 24).unwrap();
        wav.write_sine(1_000.0, Duration::from_millis(10), 0.0, Envelope::None)
            .unwrap();
        let frames = wav.to_frames().unwrap();
        assert_eq!(frames.dim(), (80, 2));
        assert_eq!(frames[[0, 0]], 0);
        for row in frames.rows() {
            assert_eq!(row[0], row[1]);
        }
        // Quarter period of 1 kHz at 8 kHz is frame 2.
        assert_eq!(frames[[2, 0]], 8_388_607);
    }

    #[test]
    fn test_positive_level_is_capped() {
        let mut wav = WavContainer::new(1, 8_000, 8).unwrap();
        wav.write_sine(2_000.0, Duration::from_millis(5), 6.0, Envelope::None)
            .unwrap();
        assert_eq!(wav.peak_amplitude().unwrap(), 127);
    }

    #[test]
    fn test_binaural_channels() {
        let mut wav = WavContainer::new(2, 8_000, 16).unwrap();
        wav.write_binaural(2_000.0, 1_000.0, Duration::from_millis(5), 0.0, Envelope::None)
            .unwrap();
        let frames = wav.to_frames().unwrap();
        // Frame 1: sin(π/2) on the left, sin(π/4) on the right.
        assert_eq!(frames[[1, 0]], 32_767);
        assert_eq!(frames[[1, 1]], 23_170);
    }

    #[test]
    fn test_adsr_shapes_the_tone() {
        let mut flat = WavContainer::new(1, 8_000, 16).unwrap();
        flat.write_sine(2_000.0, Duration::from_secs(1), 0.0, Envelope::None)
            .unwrap();
        let mut shaped = WavContainer::new(1, 8_000, 16).unwrap();
        shaped
            .write_sine(2_000.0, Duration::from_secs(1), 0.0, Envelope::adsr())
            .unwrap();
        let flat = flat.to_frames().unwrap();
        let shaped = shaped.to_frames().unwrap();

        // Frame 401 sits at the attack peak, 6001 in the sustain plateau.
        assert_eq!(flat[[401, 0]], 32_767);
        assert!((shaped[[6_001, 0]] - 22_937).abs() <= 1);
        assert!(shaped[[401, 0]].abs() <= 32_767);
        assert!(shaped[[1, 0]].abs() < 100);
        assert!(shaped[[7_997, 0]].abs() < 100);
    }

    #[test]
    fn test_synthesis_replaces_previous_data() {
        let mut wav = WavContainer::new(1, 8_000, 16).unwrap();
        wav.write_sine(100.0, Duration::from_secs(1), 0.0, Envelope::None)
            .unwrap();
        wav.write_sine(100.0, Duration::from_millis(100), 0.0, Envelope::None)
            .unwrap();
        assert_eq!(wav.sound_data().len(), 1_600);
        wav.write_sine(100.0, Duration::ZERO, 0.0, Envelope::None)
            .unwrap();
        assert!(wav.sound_data().is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        let mut wav = WavContainer::new(1, 8_000, 16).unwrap();
        let one = Duration::from_secs(1);
        assert!(wav.write_sine(-1.0, one, 0.0, Envelope::None).is_err());
        assert!(wav.write_sine(f64::NAN, one, 0.0, Envelope::None).is_err());
        assert!(wav.write_binaural(100.0, f64::INFINITY, one, 0.0, Envelope::None).is_err());
        assert!(wav.write_sine(100.0, one, f64::NAN, Envelope::None).is_err());
        let broken = Envelope::Adsr(AdsrEnvelope {
            attack: 0.9,
            decay: 0.9,
            sustain_level: 0.5,
            release: 0.0,
        });
        assert!(matches!(
            wav.write_sine(100.0, one, 0.0, broken),
            Err(WavError::InvalidParameter(_))
        ));
        assert!(wav.sound_data().is_empty());
    }

    #[test]
    fn test_oversized_tone_is_rejected() {
        let mut wav = WavContainer::new(2, 192_000, 32).unwrap();
        assert!(matches!(
            wav.write_sine(440.0, Duration::from_secs(3 * 3_600), 0.0, Envelope::None),
            Err(WavError::SizeOverflow(_))
        ));
    }

    #[test]
    fn test_big_endian_container_gets_big_endian_samples() {
        let mut wav = WavContainer::new(1, 8_000, 16).unwrap();
        wav.set_byte_order(ByteOrder::BigEndian);
        wav.write_sine(2_000.0, Duration::from_millis(1), 0.0, Envelope::None)
            .unwrap();
        assert_eq!(&wav.sound_data()[2..4], &[0x7F, 0xFF]);
    }
}
