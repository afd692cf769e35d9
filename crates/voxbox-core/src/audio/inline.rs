//! Inline audio returned by the speech-synthesis service
//!
//! Synthesized speech arrives as a MIME type such as
//! `audio/L16;codec=pcm;rate=24000` alongside base64-encoded little-endian
//! 16-bit PCM. This module recovers the sample bytes and the sample rate.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::wav::{encode_pcm16_wav, MONO};

/// Parsed raw-PCM MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmMimeType {
    /// Lowercased media type, `audio/l16` or `audio/pcm`
    pub media_type: String,
    /// Declared `rate` parameter, if any
    pub sample_rate: Option<u32>,
}

impl PcmMimeType {
    pub fn parse(mime_type: &str) -> Result<Self> {
        let mut parts = mime_type.split(';');
        let media_type = parts
            .next()
            .map(|s| s.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if media_type != "audio/l16" && media_type != "audio/pcm" {
            return Err(Error::InvalidArgument(format!(
                "unsupported audio MIME type: {}",
                mime_type
            )));
        }

        let mut sample_rate = None;
        for param in parts {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            let value = value.trim();

            match key.trim().to_ascii_lowercase().as_str() {
                "rate" => {
                    let rate = value
                        .parse::<u32>()
                        .ok()
                        .filter(|rate| *rate > 0)
                        .ok_or_else(|| {
                            Error::InvalidArgument(format!("invalid sample rate: {}", value))
                        })?;
                    sample_rate = Some(rate);
                }
                "channels" => {
                    if value.parse::<u16>().ok() != Some(MONO) {
                        return Err(Error::InvalidArgument(format!(
                            "only mono audio is supported, got channels={}",
                            value
                        )));
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            media_type,
            sample_rate,
        })
    }

    /// Declared rate, or `default` when the MIME type omits it
    pub fn rate_or(&self, default: u32) -> u32 {
        self.sample_rate.unwrap_or(default)
    }
}

/// Inline audio part as returned by the speech-synthesis API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineAudio {
    pub mime_type: String,
    /// Base64-encoded PCM
    pub data: String,
}

impl InlineAudio {
    /// Decode into PCM bytes, using `default_rate` if the MIME type has no `rate`
    pub fn decode(&self, default_rate: u32) -> Result<PcmPayload> {
        let mime = PcmMimeType::parse(&self.mime_type)?;
        let sample_rate = mime.rate_or(default_rate);
        if mime.sample_rate.is_none() {
            warn!(
                "No rate in MIME type {:?}, assuming {} Hz",
                self.mime_type, sample_rate
            );
        }

        let pcm = STANDARD.decode(self.data.trim())?;
        debug!("Decoded {} PCM bytes at {} Hz", pcm.len(), sample_rate);

        Ok(PcmPayload { pcm, sample_rate })
    }
}

/// Raw PCM bytes together with their sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmPayload {
    pub pcm: Vec<u8>,
    pub sample_rate: u32,
}

impl PcmPayload {
    pub fn new(pcm: Vec<u8>, sample_rate: u32) -> Self {
        Self { pcm, sample_rate }
    }

    /// Wrap the samples in a WAV container
    pub fn into_wav(self) -> Result<Vec<u8>> {
        encode_pcm16_wav(&self.pcm, self.sample_rate)
    }
}
