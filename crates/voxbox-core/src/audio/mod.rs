//! Audio container encoding for synthesized speech

mod decoder;
mod encoder;
mod inline;
mod wav;

pub use decoder::{decode_wav, DecodedWav};
pub use encoder::{AudioEncoder, AudioFormat, EncodedAudio};
pub use inline::{InlineAudio, PcmMimeType, PcmPayload};
pub use wav::{
    encode_pcm16_wav, WavHeader, DEFAULT_SAMPLE_RATE, MAX_PCM_LEN, MONO,
    PCM16_BITS_PER_SAMPLE, WAV_HEADER_LEN,
};
