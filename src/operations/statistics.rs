//! Level measurement for WavContainer.
//!
//! Peaks are gathered straight from the encoded bytes through the sample codec. RMS goes
//! through the normalized `ndarray` frame matrix.

use super::traits::WavStatistics;
use crate::codec::for_each_sample;
use crate::utils::audio_math::amplitude_to_db;
use crate::{WavContainer, WavError, WavResult};

impl WavStatistics for WavContainer {
    fn peak_amplitude(&self) -> WavResult<u32> {
        let depth = self.bit_depth()?;
        let mut peak = 0u32;
        for_each_sample(self.sound_data(), depth, self.byte_order(), |s| {
            peak = peak.max(s.unsigned_abs() as u32);
        });
        Ok(peak)
    }

    fn peak_db(&self) -> WavResult<f64> {
        if self.sound_data().is_empty() {
            return Err(WavError::EmptyBuffer);
        }
        let full_scale = self.bit_depth()?.full_scale();
        let peak = self.peak_amplitude()?;
        let db = amplitude_to_db(peak as f64 / full_scale);
        tracing::trace!(peak, db, "measured peak level");
        Ok(db)
    }

    fn channel_peaks(&self) -> WavResult<Vec<u32>> {
        let depth = self.bit_depth()?;
        let channels = self.format().channels() as usize;
        let whole = self.frame_count() * self.format().block_align() as usize;

        let mut peaks = vec![0u32; channels];
        let mut index = 0usize;
        for_each_sample(&self.sound_data()[..whole], depth, self.byte_order(), |s| {
            let slot = &mut peaks[index % channels];
            *slot = (*slot).max(s.unsigned_abs() as u32);
            index += 1;
        });
        Ok(peaks)
    }

    fn rms_db(&self) -> WavResult<f64> {
        let frames = self.to_normalized_frames()?;
        let mean_square = frames
            .mapv(|x| x * x)
            .mean()
            .ok_or(WavError::EmptyBuffer)?;
        Ok(amplitude_to_db(mean_square.sqrt()))
    }
}
