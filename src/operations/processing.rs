//! Gain processing for WavContainer.
//!
//! Both operations rewrite the samples in place through the codec, so the buffer length and
//! every auxiliary chunk are left as they were.

use super::traits::{WavProcessing, WavStatistics};
use crate::codec::map_samples_in_place;
use crate::utils::audio_math::db_to_amplitude;
use crate::{WavContainer, WavError, WavResult};

impl WavContainer {
    fn scale_samples(&mut self, factor: f64) -> WavResult<()> {
        let depth = self.bit_depth()?;
        let order = self.byte_order();
        map_samples_in_place(self.sound_data_mut(), depth, order, |s| {
            (s as f64 * factor).round() as i64
        });
        Ok(())
    }
}

impl WavProcessing for WavContainer {
    fn normalize_to(&mut self, target_db: f64) -> WavResult<()> {
        if target_db.is_nan() {
            return Err(WavError::invalid_parameter("normalization target is NaN"));
        }
        if self.sound_data().is_empty() {
            return Err(WavError::EmptyBuffer);
        }
        let peak = self.peak_amplitude()?;
        if peak == 0 {
            return Err(WavError::EmptyBuffer);
        }

        let target_db = target_db.min(0.0);
        let target_peak = db_to_amplitude(target_db) * self.bit_depth()?.full_scale();
        let factor = target_peak / peak as f64;
        tracing::trace!(target_db, peak, target_peak, factor, "normalizing");
        self.scale_samples(factor)
    }

    fn apply_gain_db(&mut self, gain_db: f64) -> WavResult<()> {
        if gain_db.is_nan() || gain_db == f64::INFINITY {
            return Err(WavError::invalid_parameter(format!(
                "gain of {gain_db} dB cannot be applied"
            )));
        }
        let factor = db_to_amplitude(gain_db);
        tracing::trace!(gain_db, factor, "applying gain");
        self.scale_samples(factor)
    }
}
