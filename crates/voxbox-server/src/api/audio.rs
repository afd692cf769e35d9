//! Audio wrapping endpoints
//!
//! Turn speech-synthesis output into something a media element can play.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;
use voxbox_core::{AudioFormat, EncodedAudio, InlineAudio, PcmPayload};

use crate::error::ApiError;
use crate::state::AppState;

const X_SAMPLE_RATE: &str = "x-sample-rate";
const X_AUDIO_DURATION_MS: &str = "x-audio-duration-ms";

/// Inline audio part plus the desired output format
#[derive(Debug, Deserialize)]
pub struct WavRequest {
    #[serde(flatten)]
    pub audio: InlineAudio,
    #[serde(default)]
    pub format: AudioFormat,
}

#[derive(Debug, Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub format: AudioFormat,
}

/// Wrap a base64 inline audio part
pub async fn wav(
    State(state): State<AppState>,
    req: Result<Json<WavRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = req?;
    info!(
        "WAV request: {} base64 chars, mime type {:?}",
        req.audio.data.len(),
        req.audio.mime_type
    );

    check_size(base64_decoded_len(&req.audio.data), state.max_pcm_bytes())?;

    let payload = req.audio.decode(state.encoder.sample_rate())?;
    check_size(payload.pcm.len(), state.max_pcm_bytes())?;

    let encoded = state.encoder.encode_payload(payload, req.format)?;
    Ok(audio_response(encoded))
}

/// Wrap a raw PCM request body
pub async fn wav_raw(
    State(state): State<AppState>,
    query: Result<Query<RawQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let sample_rate = query.sample_rate.unwrap_or(state.encoder.sample_rate());
    info!("Raw WAV request: {} bytes at {} Hz", body.len(), sample_rate);

    check_size(body.len(), state.max_pcm_bytes())?;

    let payload = PcmPayload::new(body.to_vec(), sample_rate);
    let encoded = state.encoder.encode_payload(payload, query.format)?;
    Ok(audio_response(encoded))
}

/// Decoded length of padded base64, without decoding it
fn base64_decoded_len(data: &str) -> usize {
    let data = data.trim();
    let padding = data.bytes().rev().take_while(|b| *b == b'=').count();
    (data.len() / 4 * 3).saturating_sub(padding)
}

fn check_size(len: usize, max: usize) -> Result<(), ApiError> {
    if len > max {
        return Err(ApiError::payload_too_large(format!(
            "audio payload of {} bytes exceeds the {} byte limit",
            len, max
        )));
    }
    Ok(())
}

fn audio_response(encoded: EncodedAudio) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(encoded.content_type()),
            ),
            (
                HeaderName::from_static(X_SAMPLE_RATE),
                HeaderValue::from(encoded.sample_rate),
            ),
            (
                HeaderName::from_static(X_AUDIO_DURATION_MS),
                HeaderValue::from(encoded.duration_ms.round() as u64),
            ),
        ],
        encoded.data,
    )
        .into_response()
}
