//! Audio encoding to playable output formats

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EncoderConfig;
use crate::error::{Error, Result};

use super::inline::PcmPayload;
use super::wav::{encode_pcm16_wav, MONO, PCM16_BITS_PER_SAMPLE};

/// Supported audio output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WAV container (16-bit mono PCM)
    #[default]
    Wav,
    /// Raw PCM samples (i16 little-endian), passed through untouched
    RawPcm16,
}

impl AudioFormat {
    /// Get content type for format
    pub fn content_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::RawPcm16 => "application/octet-stream",
        }
    }
}

/// Encoder for turning raw synthesized PCM into a playable buffer
#[derive(Debug, Clone)]
pub struct AudioEncoder {
    sample_rate: u32,
    strict_alignment: bool,
}

impl AudioEncoder {
    /// Create a new encoder
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            strict_alignment: false,
        }
    }

    pub fn from_config(config: &EncoderConfig) -> Self {
        Self {
            sample_rate: config.default_sample_rate,
            strict_alignment: config.strict_alignment,
        }
    }

    /// Reject PCM whose length is not a whole number of 16-bit samples
    pub fn with_strict_alignment(mut self, strict: bool) -> Self {
        self.strict_alignment = strict;
        self
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Encode PCM at the encoder's sample rate
    pub fn encode(&self, pcm: &[u8], format: AudioFormat) -> Result<EncodedAudio> {
        self.encode_at(pcm, self.sample_rate, format)
    }

    /// Encode a payload at the rate it was synthesized with
    pub fn encode_payload(&self, payload: PcmPayload, format: AudioFormat) -> Result<EncodedAudio> {
        self.encode_at(&payload.pcm, payload.sample_rate, format)
    }

    fn encode_at(&self, pcm: &[u8], sample_rate: u32, format: AudioFormat) -> Result<EncodedAudio> {
        let block_align = usize::from(MONO * PCM16_BITS_PER_SAMPLE / 8);
        if pcm.len() % block_align != 0 {
            if self.strict_alignment {
                return Err(Error::InvalidArgument(format!(
                    "{} PCM bytes is not a whole number of 16-bit samples",
                    pcm.len()
                )));
            }
            warn!("PCM length {} has a trailing partial sample", pcm.len());
        }

        let data = match format {
            AudioFormat::Wav => encode_pcm16_wav(pcm, sample_rate)?,
            AudioFormat::RawPcm16 => {
                if sample_rate == 0 {
                    return Err(Error::InvalidArgument(
                        "sample rate must be positive".to_string(),
                    ));
                }
                pcm.to_vec()
            }
        };

        let sample_count = pcm.len() / block_align;
        debug!(
            "Encoded {} samples as {:?} ({} bytes)",
            sample_count,
            format,
            data.len()
        );

        Ok(EncodedAudio::new(
            Bytes::from(data),
            format,
            sample_count,
            sample_rate,
        ))
    }
}

/// Encoded audio ready for playback
#[derive(Debug, Clone)]
pub struct EncodedAudio {
    pub data: Bytes,
    pub format: AudioFormat,
    pub sample_count: usize,
    pub sample_rate: u32,
    pub duration_ms: f32,
}

impl EncodedAudio {
    pub fn new(data: Bytes, format: AudioFormat, sample_count: usize, sample_rate: u32) -> Self {
        let duration_ms = (sample_count as f32 / sample_rate as f32) * 1000.0;
        Self {
            data,
            format,
            sample_count,
            sample_rate,
            duration_ms,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}
