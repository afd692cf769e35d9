//! Decoding WAV containers back into playback parameters

use hound::{SampleFormat, WavReader};
use std::io::Cursor;
use tracing::debug;

use crate::error::{Error, Result};

use super::wav::PCM16_BITS_PER_SAMPLE;

/// A decoded 16-bit integer PCM WAV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWav {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub samples: Vec<i16>,
}

impl DecodedWav {
    /// Samples re-serialized as little-endian bytes
    pub fn pcm_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 2);
        for &sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }

    /// Playback length in milliseconds
    pub fn duration_ms(&self) -> f32 {
        let frames = self.samples.len() / usize::from(self.channels.max(1));
        (frames as f32 / self.sample_rate as f32) * 1000.0
    }
}

/// Parse a WAV buffer holding 16-bit integer PCM
pub fn decode_wav(bytes: &[u8]) -> Result<DecodedWav> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != PCM16_BITS_PER_SAMPLE {
        return Err(Error::AudioError(format!(
            "expected 16-bit integer PCM, found {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(
        "Decoded WAV: {} Hz, {} channel(s), {} samples",
        spec.sample_rate,
        spec.channels,
        samples.len()
    );

    Ok(DecodedWav {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        samples,
    })
}
