//! In-memory representation of a WAVE container.

use core::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

use ndarray::Array2;

use crate::chunks::{
    AuxiliaryChunk, ChunkId, DATA_CHUNK, FMT_BODY_SIZE, FMT_CHUNK, FormatDescriptor, RIFF_CHUNK,
    RIFX_CHUNK, chunk_footprint,
};
use crate::codec::{BitDepth, ByteOrder, for_each_sample};
use crate::{WavError, WavResult};

/// A RIFF/WAVE container: one format descriptor, one sound-data buffer and the auxiliary
/// chunks that followed them, in the order they were read.
///
/// Size fields are never stored. [`riff_size`](WavContainer::riff_size) and every chunk
/// header written by [`write_wav`](crate::write_wav) are recomputed from the current
/// contents.
///
/// # Examples
///
/// ```rust
/// use riff_pcm::WavContainer;
///
/// let wav = WavContainer::new(2, 44_100, 16).unwrap();
/// assert_eq!(wav.riff_size().unwrap(), 36);
/// assert!(wav.sound_data().is_empty());
/// assert_eq!(wav.format().block_align(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavContainer {
    riff_id: ChunkId,
    byte_order: ByteOrder,
    format: FormatDescriptor,
    data: Vec<u8>,
    auxiliary: Vec<AuxiliaryChunk>,
}

impl WavContainer {
    /// Creates an empty little-endian PCM container.
    ///
    /// # Errors
    ///
    /// [`WavError::InvalidFormat`] if `channels` or `sample_rate` is zero, or
    /// `bits_per_sample` is not a positive multiple of eight.
    pub fn new(channels: u16, sample_rate: u32, bits_per_sample: u16) -> WavResult<Self> {
        Ok(Self::with_format(FormatDescriptor::pcm(
            channels,
            sample_rate,
            bits_per_sample,
        )?))
    }

    /// Creates an empty little-endian container around an existing descriptor.
    pub const fn with_format(format: FormatDescriptor) -> Self {
        WavContainer {
            riff_id: RIFF_CHUNK,
            byte_order: ByteOrder::LittleEndian,
            format,
            data: Vec::new(),
            auxiliary: Vec::new(),
        }
    }

    pub(crate) const fn from_parts(
        riff_id: ChunkId,
        byte_order: ByteOrder,
        format: FormatDescriptor,
        data: Vec<u8>,
        auxiliary: Vec<AuxiliaryChunk>,
    ) -> Self {
        WavContainer {
            riff_id,
            byte_order,
            format,
            data,
            auxiliary,
        }
    }

    /// The format descriptor.
    pub const fn format(&self) -> &FormatDescriptor {
        &self.format
    }

    /// The container header tag, `RIFF` or `RIFX`.
    pub const fn riff_id(&self) -> ChunkId {
        self.riff_id
    }

    /// Byte order used for every size field, fmt field and sample.
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Switches the container's byte order, reversing every sample in place and updating
    /// the header tag to match.
    pub fn set_byte_order(&mut self, order: ByteOrder) {
        let width = self.format.bytes_per_sample();
        if order != self.byte_order && width > 1 {
            for sample in self.data.chunks_exact_mut(width) {
                sample.reverse();
            }
        }
        self.byte_order = order;
        self.riff_id = match order {
            ByteOrder::LittleEndian => RIFF_CHUNK,
            ByteOrder::BigEndian => RIFX_CHUNK,
        };
    }

    /// The sample codec for this container's depth.
    ///
    /// # Errors
    ///
    /// [`WavError::UnsupportedBitDepth`] for depths other than 8, 16, 24 and 32.
    pub fn bit_depth(&self) -> WavResult<BitDepth> {
        self.format.bit_depth()
    }

    /// The raw interleaved sound data.
    pub fn sound_data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the sound data. The length cannot change through this view.
    pub fn sound_data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Replaces the sound data wholesale.
    ///
    /// # Errors
    ///
    /// [`WavError::InvalidParameter`] if the length is not a whole number of frames, and
    /// [`WavError::SizeOverflow`] if the container would no longer fit a 32-bit RIFF size.
    /// The container is unchanged on error.
    pub fn set_sound_data(&mut self, data: Vec<u8>) -> WavResult<()> {
        let block_align = self.format.block_align() as usize;
        if data.len() % block_align != 0 {
            return Err(WavError::invalid_parameter(format!(
                "sound data of {} bytes is not a multiple of the {block_align}-byte frame",
                data.len()
            )));
        }
        let size = self.riff_size_with(data.len() as u64, self.auxiliary_footprint());
        if size > u32::MAX as u64 {
            return Err(WavError::SizeOverflow(size));
        }
        self.data = data;
        Ok(())
    }

    /// Removes and returns the sound data, leaving the container empty.
    pub fn take_sound_data(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.data)
    }

    /// Auxiliary chunks in stream order.
    pub fn auxiliary_chunks(&self) -> &[AuxiliaryChunk] {
        &self.auxiliary
    }

    /// Appends an auxiliary chunk after the existing ones.
    ///
    /// # Errors
    ///
    /// [`WavError::InvalidParameter`] if `chunk` reuses the `fmt `, `data`, `RIFF` or `RIFX`
    /// tag, and [`WavError::SizeOverflow`] if the container would no longer fit a 32-bit
    /// RIFF size.
    pub fn push_auxiliary_chunk(&mut self, chunk: AuxiliaryChunk) -> WavResult<()> {
        let id = chunk.id();
        if id.is_container_header() || id == FMT_CHUNK || id == DATA_CHUNK {
            return Err(WavError::invalid_parameter(format!(
                "{id} cannot be stored as an auxiliary chunk"
            )));
        }
        let size = self.riff_size_with(
            self.data.len() as u64,
            self.auxiliary_footprint() + chunk_footprint(chunk.len() as u64),
        );
        if size > u32::MAX as u64 {
            return Err(WavError::SizeOverflow(size));
        }
        self.auxiliary.push(chunk);
        Ok(())
    }

    /// Removes every auxiliary chunk, returning them in order.
    pub fn clear_auxiliary_chunks(&mut self) -> Vec<AuxiliaryChunk> {
        std::mem::take(&mut self.auxiliary)
    }

    /// The top-level RIFF size: every byte after the 8-byte container header.
    ///
    /// Computed as `4 + 24 + (8 + data) + Σ (8 + aux)`, each payload rounded up to an even
    /// length. With no auxiliary chunks and even-length data this is `36 + data`.
    ///
    /// # Errors
    ///
    /// [`WavError::SizeOverflow`] if the total does not fit in 32 bits.
    pub fn riff_size(&self) -> WavResult<u32> {
        let size = self.riff_size_with(self.data.len() as u64, self.auxiliary_footprint());
        u32::try_from(size).map_err(|_| WavError::SizeOverflow(size))
    }

    fn riff_size_with(&self, data_len: u64, auxiliary_footprint: u64) -> u64 {
        4 + chunk_footprint(FMT_BODY_SIZE as u64) + chunk_footprint(data_len) + auxiliary_footprint
    }

    fn auxiliary_footprint(&self) -> u64 {
        self.auxiliary
            .iter()
            .map(|chunk| chunk_footprint(chunk.len() as u64))
            .sum()
    }

    /// Number of whole frames in the sound data.
    pub fn frame_count(&self) -> usize {
        self.data.len() / self.format.block_align() as usize
    }

    /// Number of whole samples in the sound data, across all channels.
    pub fn sample_count(&self) -> usize {
        self.frame_count() * self.format.channels() as usize
    }

    /// Playback length of the sound data.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / self.format.sample_rate() as f64)
    }

    /// Decodes the sound data into a `frames × channels` matrix.
    ///
    /// Bytes after the last whole frame are ignored.
    ///
    /// # Errors
    ///
    /// [`WavError::UnsupportedBitDepth`] for depths other than 8, 16, 24 and 32.
    pub fn to_frames(&self) -> WavResult<Array2<i32>> {
        let depth = self.bit_depth()?;
        let channels = self.format.channels() as usize;
        let frames = self.frame_count();
        let whole = frames * self.format.block_align() as usize;

        let mut samples = Vec::with_capacity(frames * channels);
        for_each_sample(&self.data[..whole], depth, self.byte_order, |s| {
            samples.push(s as i32)
        });
        Array2::from_shape_vec((frames, channels), samples)
            .map_err(|e| WavError::invalid_format(format!("frame layout mismatch: {e}")))
    }

    /// Decodes the sound data into a `frames × channels` matrix of values scaled so full
    /// scale is `±1.0`.
    #[cfg_attr(not(feature = "statistics"), allow(dead_code))]
    pub(crate) fn to_normalized_frames(&self) -> WavResult<Array2<f64>> {
        let full_scale = self.bit_depth()?.full_scale();
        Ok(self.to_frames()?.mapv(|s| s as f64 / full_scale))
    }
}

impl Display for WavContainer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "WAVE container:")?;
        match self.riff_size() {
            Ok(size) => writeln!(f, "  {} size: {size}", self.riff_id)?,
            Err(_) => writeln!(f, "  {} size: overflow", self.riff_id)?,
        }
        writeln!(f, "  Audio format: {}", self.format.audio_format())?;
        writeln!(f, "  Channels: {}", self.format.channels())?;
        writeln!(f, "  Sample rate: {} Hz", self.format.sample_rate())?;
        writeln!(f, "  Byte rate: {}", self.format.byte_rate())?;
        writeln!(f, "  Block align: {}", self.format.block_align())?;
        writeln!(f, "  Bits per sample: {}", self.format.bits_per_sample())?;
        writeln!(f, "  Data size: {} bytes", self.data.len())?;
        writeln!(f, "  Duration: {:.3} s", self.duration().as_secs_f64())?;
        if self.auxiliary.is_empty() {
            writeln!(f, "  Auxiliary chunks: none")?;
        } else {
            writeln!(f, "  Auxiliary chunks:")?;
            for chunk in &self.auxiliary {
                writeln!(f, "    {} ({} bytes)", chunk.id(), chunk.len())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_sample;

    #[test]
    fn test_new_container_is_empty() {
        let wav = WavContainer::new(1, 8_000, 8).unwrap();
        assert_eq!(wav.riff_size().unwrap(), 36);
        assert_eq!(wav.frame_count(), 0);
        assert_eq!(wav.duration(), Duration::ZERO);
        assert_eq!(wav.riff_id(), RIFF_CHUNK);
        assert!(wav.auxiliary_chunks().is_empty());
    }

    #[test]
    fn test_new_container_rejects_bad_format() {
        assert!(matches!(
            WavContainer::new(0, 44_100, 16),
            Err(WavError::InvalidFormat(_))
        ));
        assert!(matches!(
            WavContainer::new(2, 44_100, 7),
            Err(WavError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_riff_size_accounts_for_auxiliary_chunks() {
        let mut wav = WavContainer::new(2, 44_100, 16).unwrap();
        wav.set_sound_data(vec![0; 400]).unwrap();
        assert_eq!(wav.riff_size().unwrap(), 436);

        wav.push_auxiliary_chunk(AuxiliaryChunk::new(*b"LIST", vec![1, 2, 3]))
            .unwrap();
        // 8-byte header, 3 payload bytes, 1 pad byte.
        assert_eq!(wav.riff_size().unwrap(), 448);
    }

    #[test]
    fn test_set_sound_data_requires_whole_frames() {
        let mut wav = WavContainer::new(2, 44_100, 24).unwrap();
        assert!(wav.set_sound_data(vec![0; 7]).is_err());
        assert!(wav.sound_data().is_empty());
        wav.set_sound_data(vec![0; 12]).unwrap();
        assert_eq!(wav.frame_count(), 2);
        assert_eq!(wav.sample_count(), 4);
    }

    #[test]
    fn test_push_rejects_reserved_tags() {
        let mut wav = WavContainer::new(1, 8_000, 16).unwrap();
        assert!(
            wav.push_auxiliary_chunk(AuxiliaryChunk::new(*b"data", vec![]))
                .is_err()
        );
        assert!(
            wav.push_auxiliary_chunk(AuxiliaryChunk::new(*b"RIFF", vec![]))
                .is_err()
        );
        assert!(
            wav.push_auxiliary_chunk(AuxiliaryChunk::new(*b"fact", vec![0; 4]))
                .is_ok()
        );
    }

    #[test]
    fn test_to_frames_deinterleaves() {
        let mut wav = WavContainer::new(2, 8_000, 16).unwrap();
        let mut data = Vec::new();
        for value in [1, -1, 2, -2, 3, -3] {
            data.extend_from_slice(&encode_sample(value, BitDepth::Sixteen));
        }
        wav.set_sound_data(data).unwrap();

        let frames = wav.to_frames().unwrap();
        assert_eq!(frames.dim(), (3, 2));
        assert_eq!(frames.column(0).to_vec(), vec![1, 2, 3]);
        assert_eq!(frames.column(1).to_vec(), vec![-1, -2, -3]);
    }

    #[test]
    fn test_set_byte_order_swaps_samples() {
        let mut wav = WavContainer::new(1, 8_000, 16).unwrap();
        wav.set_sound_data(encode_sample(0x0102, BitDepth::Sixteen).to_vec())
            .unwrap();
        wav.set_byte_order(ByteOrder::BigEndian);
        assert_eq!(wav.riff_id(), RIFX_CHUNK);
        assert_eq!(wav.sound_data(), &[0x01, 0x02]);
        assert_eq!(wav.to_frames().unwrap()[[0, 0]], 0x0102);
    }

    #[test]
    fn test_display_lists_metadata() {
        let mut wav = WavContainer::new(2, 44_100, 16).unwrap();
        wav.push_auxiliary_chunk(AuxiliaryChunk::new(*b"LIST", vec![0; 10]))
            .unwrap();
        let report = wav.to_string();
        assert!(report.contains("Channels: 2"));
        assert!(report.contains("Sample rate: 44100 Hz"));
        assert!(report.contains("\"LIST\" (10 bytes)"));
    }
}
