//! # Container Codec
//!
//! Serializes [`WavContainer`]s to and from byte streams, one chunk at a time.
//!
//! The reader walks `(tag, length)` headers until the stream ends. `fmt ` and `data` are
//! interpreted; every other tag is kept as an [`AuxiliaryChunk`] so that writing the
//! container back reproduces it. Odd-length chunks are followed by a pad byte, as RIFF
//! requires.
//!
//! ```rust
//! use riff_pcm::{AuxiliaryChunk, WavContainer, read_wav, write_wav};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut wav = WavContainer::new(1, 8_000, 16)?;
//! wav.set_sound_data(vec![0x10, 0x00, 0xF0, 0xFF])?;
//! wav.push_auxiliary_chunk(AuxiliaryChunk::new(*b"note", b"hi!".to_vec()))?;
//!
//! let mut bytes = Vec::new();
//! write_wav(&wav, &mut bytes)?;
//! let decoded = read_wav(bytes.as_slice())?;
//! assert_eq!(decoded, wav);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::io::{ErrorKind, Read, Write};

use tracing::{debug, warn};

use crate::chunks::{
    AuxiliaryChunk, ChunkId, DATA_CHUNK, FMT_BODY_SIZE, FMT_CHUNK, FormatDescriptor, RIFX_CHUNK,
    WAVE_CHUNK,
};
use crate::codec::ByteOrder;
use crate::repr::WavContainer;
use crate::{WavError, WavResult};

/// Settings for [`read_wav_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    max_chunk_size: u32,
    rifx_big_endian: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadOptions {
    /// Accepts any chunk length and reads `RIFX` containers as big-endian.
    pub const fn new() -> Self {
        ReadOptions {
            max_chunk_size: u32::MAX,
            rifx_big_endian: true,
        }
    }

    /// Rejects chunks declaring more than `max_chunk_size` bytes before allocating for them.
    pub const fn with_max_chunk_size(mut self, max_chunk_size: u32) -> Self {
        self.max_chunk_size = max_chunk_size;
        self
    }

    /// Chooses whether a `RIFX` header switches the rest of the stream to big-endian.
    ///
    /// With `false`, `RIFX` containers are read as little-endian and written back the same
    /// way, which matches writers that set the tag without swapping any bytes.
    pub const fn with_rifx_big_endian(mut self, rifx_big_endian: bool) -> Self {
        self.rifx_big_endian = rifx_big_endian;
        self
    }

    /// Largest accepted chunk length.
    pub const fn max_chunk_size(&self) -> u32 {
        self.max_chunk_size
    }

    /// Whether `RIFX` means big-endian.
    pub const fn rifx_big_endian(&self) -> bool {
        self.rifx_big_endian
    }
}

/// Decodes a container from `reader` with default [`ReadOptions`].
///
/// # Errors
///
/// See [`read_wav_with_options`].
pub fn read_wav<R: Read>(reader: R) -> WavResult<WavContainer> {
    read_wav_with_options(reader, &ReadOptions::default())
}

/// Decodes a container from `reader`, consuming it to the end.
///
/// # Errors
///
/// - [`WavError::NotWaveFile`] if the stream does not open with `RIFF`/`RIFX` + `WAVE`.
/// - [`WavError::TruncatedData`] if a chunk header or payload is cut short.
/// - [`WavError::InvalidFormat`] for an unusable `fmt ` body or a chunk above
///   [`ReadOptions::max_chunk_size`].
/// - [`WavError::MissingChunk`] / [`WavError::DuplicateChunk`] unless exactly one `fmt `
///   and one `data` chunk are present.
/// - [`WavError::AllocationFailure`] if a payload buffer cannot be reserved.
/// - [`WavError::ReadFailure`] for any other I/O error.
pub fn read_wav_with_options<R: Read>(
    mut reader: R,
    options: &ReadOptions,
) -> WavResult<WavContainer> {
    // The container header decides the byte order of everything after it.
    let (riff_id, raw_size) = match read_raw_header(&mut reader)? {
        Some(header) => header,
        None => {
            return Err(WavError::NotWaveFile {
                found: ChunkId::new([0; 4]),
            });
        }
    };
    if !riff_id.is_container_header() {
        return Err(WavError::NotWaveFile { found: riff_id });
    }
    let order = if riff_id == RIFX_CHUNK && options.rifx_big_endian {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };
    let declared_size = order.u32_from(raw_size);

    let mut form = [0u8; 4];
    let filled = fill(&mut reader, &mut form)?;
    if filled < form.len() {
        return Err(WavError::TruncatedData {
            chunk: riff_id,
            expected: form.len(),
            available: filled,
        });
    }
    let form = ChunkId::new(form);
    if form != WAVE_CHUNK {
        return Err(WavError::NotWaveFile { found: form });
    }
    debug!(%riff_id, declared_size, ?order, "reading WAVE container");

    let mut format: Option<FormatDescriptor> = None;
    let mut data: Option<Vec<u8>> = None;
    let mut auxiliary = Vec::new();

    while let Some((id, raw_len)) = read_raw_header(&mut reader)? {
        let len = order.u32_from(raw_len);
        if len > options.max_chunk_size {
            return Err(WavError::invalid_format(format!(
                "{id} chunk declares {len} bytes, limit is {}",
                options.max_chunk_size
            )));
        }
        debug!(%id, len, "chunk");

        match id {
            FMT_CHUNK => {
                if format.is_some() {
                    return Err(WavError::DuplicateChunk(FMT_CHUNK));
                }
                let body = read_payload(&mut reader, id, len)?;
                if body.len() > FMT_BODY_SIZE {
                    warn!(
                        extension = body.len() - FMT_BODY_SIZE,
                        "skipping fmt extension bytes"
                    );
                }
                format = Some(FormatDescriptor::from_bytes(&body, order)?);
            }
            DATA_CHUNK => {
                if data.is_some() {
                    return Err(WavError::DuplicateChunk(DATA_CHUNK));
                }
                data = Some(read_payload(&mut reader, id, len)?);
            }
            id if id.is_container_header() => return Err(WavError::DuplicateChunk(id)),
            id => auxiliary.push(AuxiliaryChunk::new(id, read_payload(&mut reader, id, len)?)),
        }

        if len & 1 == 1 {
            skip_pad_byte(&mut reader, id)?;
        }
    }

    let format = format.ok_or(WavError::MissingChunk(FMT_CHUNK))?;
    let data = data.ok_or(WavError::MissingChunk(DATA_CHUNK))?;
    if data.len() % format.block_align() as usize != 0 {
        warn!(
            data_len = data.len(),
            block_align = format.block_align(),
            "data chunk ends with a partial frame"
        );
    }

    let container = WavContainer::from_parts(riff_id, order, format, data, auxiliary);
    match container.riff_size() {
        Ok(size) if size == declared_size => {}
        Ok(size) => warn!(declared_size, size, "RIFF size field does not match contents"),
        Err(err) => warn!(%err, "decoded container exceeds the RIFF size limit"),
    }
    Ok(container)
}

/// Encodes `container` to `writer`, recomputing every size field.
///
/// Writes the `RIFF`/`RIFX` header, a 16-byte `fmt ` chunk, the `data` chunk and then each
/// auxiliary chunk in order, padding odd-length payloads. Nothing is rolled back on error;
/// the destination must be treated as invalid.
///
/// # Errors
///
/// [`WavError::SizeOverflow`] if the container does not fit a 32-bit RIFF size, and
/// [`WavError::WriteFailure`] if the writer fails or accepts fewer bytes than requested.
pub fn write_wav<W: Write>(container: &WavContainer, mut writer: W) -> WavResult<()> {
    let order = container.byte_order();
    let riff_size = container.riff_size()?;
    debug!(riff_id = %container.riff_id(), riff_size, ?order, "writing WAVE container");

    put(&mut writer, container.riff_id().as_bytes())?;
    put(&mut writer, &order.u32_bytes(riff_size))?;
    put(&mut writer, WAVE_CHUNK.as_bytes())?;

    write_chunk(&mut writer, FMT_CHUNK, &container.format().to_bytes(order), order)?;
    write_chunk(&mut writer, DATA_CHUNK, container.sound_data(), order)?;
    for chunk in container.auxiliary_chunks() {
        write_chunk(&mut writer, chunk.id(), chunk.data(), order)?;
    }

    writer.flush().map_err(WavError::WriteFailure)
}

impl WavContainer {
    /// Decodes a container from `reader`. See [`read_wav`].
    ///
    /// # Errors
    ///
    /// See [`read_wav_with_options`].
    pub fn from_reader<R: Read>(reader: R) -> WavResult<Self> {
        read_wav(reader)
    }

    /// Decodes a container from an in-memory byte slice.
    ///
    /// # Errors
    ///
    /// See [`read_wav_with_options`].
    pub fn from_bytes(bytes: &[u8]) -> WavResult<Self> {
        read_wav(bytes)
    }

    /// Encodes the container to `writer`. See [`write_wav`].
    ///
    /// # Errors
    ///
    /// See [`write_wav`].
    pub fn write_to<W: Write>(&self, writer: W) -> WavResult<()> {
        write_wav(self, writer)
    }

    /// Encodes the container into a new byte vector.
    ///
    /// # Errors
    ///
    /// [`WavError::SizeOverflow`] if the container does not fit a 32-bit RIFF size, and
    /// [`WavError::AllocationFailure`] if the output buffer cannot be reserved.
    pub fn to_bytes(&self) -> WavResult<Vec<u8>> {
        let total = self.riff_size()? as usize + 8;
        let mut out = Vec::new();
        out.try_reserve_exact(total)
            .map_err(|_| WavError::AllocationFailure { requested: total })?;
        write_wav(self, &mut out)?;
        Ok(out)
    }
}

/// Reads as many bytes as are available into `buf`, stopping early only at end-of-stream.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> WavResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(WavError::ReadFailure(e)),
        }
    }
    Ok(filled)
}

/// Reads an 8-byte chunk header. `None` at a clean end-of-stream.
fn read_raw_header<R: Read>(reader: &mut R) -> WavResult<Option<(ChunkId, [u8; 4])>> {
    let mut header = [0u8; 8];
    let filled = fill(reader, &mut header)?;
    if filled == 0 {
        return Ok(None);
    }
    let id = ChunkId::new([header[0], header[1], header[2], header[3]]);
    if filled < header.len() {
        return Err(WavError::TruncatedData {
            chunk: id,
            expected: header.len(),
            available: filled,
        });
    }
    Ok(Some((id, [header[4], header[5], header[6], header[7]])))
}

fn read_payload<R: Read>(reader: &mut R, id: ChunkId, len: u32) -> WavResult<Vec<u8>> {
    let len = len as usize;
    let mut payload = Vec::new();
    payload
        .try_reserve_exact(len)
        .map_err(|_| WavError::AllocationFailure { requested: len })?;

    let read = reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut payload)
        .map_err(WavError::ReadFailure)?;
    if read < len {
        return Err(WavError::TruncatedData {
            chunk: id,
            expected: len,
            available: read,
        });
    }
    Ok(payload)
}

fn skip_pad_byte<R: Read>(reader: &mut R, id: ChunkId) -> WavResult<()> {
    let mut pad = [0u8; 1];
    if fill(reader, &mut pad)? == 0 {
        warn!(%id, "stream ends without the pad byte after an odd-length chunk");
    }
    Ok(())
}

fn put<W: Write>(writer: &mut W, bytes: &[u8]) -> WavResult<()> {
    writer.write_all(bytes).map_err(WavError::WriteFailure)
}

fn write_chunk<W: Write>(
    writer: &mut W,
    id: ChunkId,
    payload: &[u8],
    order: ByteOrder,
) -> WavResult<()> {
    let len = u32::try_from(payload.len())
        .map_err(|_| WavError::SizeOverflow(payload.len() as u64))?;
    debug!(%id, len, "writing chunk");
    put(writer, id.as_bytes())?;
    put(writer, &order.u32_bytes(len))?;
    put(writer, payload)?;
    if len & 1 == 1 {
        put(writer, &[0])?;
    }
    Ok(())
}
