//! Canonical RIFF/WAVE container for 16-bit mono PCM

use bytes::BufMut;
use tracing::debug;

use crate::error::{Error, Result};

/// Size of the fixed RIFF/WAVE header written ahead of the samples
pub const WAV_HEADER_LEN: usize = 44;

/// Bit depth of the PCM handed back by the speech-synthesis service
pub const PCM16_BITS_PER_SAMPLE: u16 = 16;

/// Channel count of synthesized speech
pub const MONO: u16 = 1;

/// Sample rate the speech-synthesis service reports in practice
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Bytes of the RIFF chunk that follow the size field, excluding sample data
const RIFF_OVERHEAD: u32 = 36;

/// Largest PCM buffer the 32-bit RIFF size field can describe
pub const MAX_PCM_LEN: usize = (u32::MAX - RIFF_OVERHEAD) as usize;

/// `fmt ` subchunk body length for plain PCM
const FMT_CHUNK_LEN: u32 = 16;

/// WAVE_FORMAT_PCM
const FORMAT_PCM: u16 = 1;

/// Playback parameters declared by a WAV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Length in bytes of the `data` subchunk
    pub data_len: u32,
}

impl WavHeader {
    /// Header for 16-bit mono PCM
    pub fn pcm16_mono(sample_rate: u32, data_len: u32) -> Self {
        Self {
            sample_rate,
            channels: MONO,
            bits_per_sample: PCM16_BITS_PER_SAMPLE,
            data_len,
        }
    }

    /// Bytes per sample frame across all channels
    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    /// Bytes of audio per second of playback
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .saturating_mul(u32::from(self.channels) * u32::from(self.bits_per_sample) / 8)
    }

    /// Value of the RIFF chunk size field
    pub fn riff_chunk_size(&self) -> u32 {
        RIFF_OVERHEAD + self.data_len
    }

    /// Write the 44 header bytes, all integers little-endian
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        // RIFF header
        buf.put_slice(b"RIFF");
        buf.put_u32_le(self.riff_chunk_size());
        buf.put_slice(b"WAVE");

        // fmt chunk
        buf.put_slice(b"fmt ");
        buf.put_u32_le(FMT_CHUNK_LEN);
        buf.put_u16_le(FORMAT_PCM);
        buf.put_u16_le(self.channels);
        buf.put_u32_le(self.sample_rate);
        buf.put_u32_le(self.byte_rate());
        buf.put_u16_le(self.block_align());
        buf.put_u16_le(self.bits_per_sample);

        // data chunk
        buf.put_slice(b"data");
        buf.put_u32_le(self.data_len);
    }
}

/// Wrap raw little-endian 16-bit mono PCM in a WAV container.
///
/// The returned buffer is exactly `44 + pcm.len()` bytes: the header
/// followed by `pcm` copied verbatim. Odd-length input is copied as-is.
///
/// Fails with [`Error::InvalidArgument`] when `sample_rate` is zero, when
/// the resulting byte rate does not fit the header field, or when `pcm` is
/// too large for the 32-bit RIFF size field.
pub fn encode_pcm16_wav(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>> {
    if sample_rate == 0 {
        return Err(Error::InvalidArgument(
            "sample rate must be positive".to_string(),
        ));
    }

    let header = WavHeader::pcm16_mono(sample_rate, 0);
    if sample_rate > u32::MAX / u32::from(header.block_align()) {
        return Err(Error::InvalidArgument(format!(
            "sample rate {} overflows the byte rate field",
            sample_rate
        )));
    }

    if pcm.len() > MAX_PCM_LEN {
        return Err(Error::InvalidArgument(format!(
            "{} bytes of PCM exceed the WAV size limit",
            pcm.len()
        )));
    }
    let data_len = pcm.len() as u32;
    let header = WavHeader { data_len, ..header };

    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    header.write_to(&mut buffer);
    buffer.put_slice(pcm);

    debug!(
        "Encoded {} PCM bytes at {} Hz to WAV ({} bytes)",
        pcm.len(),
        sample_rate,
        buffer.len()
    );
    Ok(buffer)
}
