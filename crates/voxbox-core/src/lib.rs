//! Voxbox Core - PCM-to-WAV container encoding
//!
//! Speech-synthesis services hand back raw little-endian 16-bit mono PCM.
//! Browsers and media decoders cannot play that directly, so this crate
//! wraps the samples in a canonical 44-byte RIFF/WAVE header.
//!
//! # Example
//!
//! ```
//! use voxbox_core::audio::encode_pcm16_wav;
//!
//! let wav = encode_pcm16_wav(&[0x01, 0x02, 0x03, 0x04], 24000)?;
//! assert_eq!(wav.len(), 48);
//! assert_eq!(&wav[0..4], b"RIFF");
//! # Ok::<(), voxbox_core::Error>(())
//! ```

pub mod audio;
pub mod config;
pub mod error;

pub use audio::{
    decode_wav, encode_pcm16_wav, AudioEncoder, AudioFormat, DecodedWav, EncodedAudio,
    InlineAudio, PcmMimeType, PcmPayload, WavHeader,
};
pub use config::{EncoderConfig, ServerConfig, VoxboxConfig};
pub use error::{Error, Result};
