//! Configuration types for Voxbox

use serde::{Deserialize, Serialize};

use crate::audio::{DEFAULT_SAMPLE_RATE, MAX_PCM_LEN};
use crate::error::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoxboxConfig {
    #[serde(default)]
    pub encoder: EncoderConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl VoxboxConfig {
    pub fn validate(&self) -> Result<()> {
        self.encoder.validate()
    }
}

/// Encoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Sample rate assumed when a payload does not declare one
    #[serde(default = "default_sample_rate")]
    pub default_sample_rate: u32,

    /// Reject PCM that is not a whole number of 16-bit samples
    #[serde(default)]
    pub strict_alignment: bool,

    /// Largest PCM payload accepted, in bytes
    #[serde(default = "default_max_pcm_bytes")]
    pub max_pcm_bytes: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            default_sample_rate: default_sample_rate(),
            strict_alignment: false,
            max_pcm_bytes: default_max_pcm_bytes(),
        }
    }
}

impl EncoderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_sample_rate == 0 {
            return Err(Error::ConfigError(
                "encoder.default_sample_rate must be positive".to_string(),
            ));
        }
        if self.max_pcm_bytes == 0 {
            return Err(Error::ConfigError(
                "encoder.max_pcm_bytes must be positive".to_string(),
            ));
        }
        if self.max_pcm_bytes > MAX_PCM_LEN {
            return Err(Error::ConfigError(format!(
                "encoder.max_pcm_bytes must not exceed {}",
                MAX_PCM_LEN
            )));
        }
        Ok(())
    }
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_max_pcm_bytes() -> usize {
    32 * 1024 * 1024
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_cors_enabled(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_enabled() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VoxboxConfig::default();
        assert_eq!(config.encoder.default_sample_rate, 24000);
        assert!(!config.encoder.strict_alignment);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.cors_origins, vec!["*"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: VoxboxConfig =
            serde_json::from_str(r#"{"encoder":{"strict_alignment":true},"server":{"port":9000}}"#)
                .unwrap();
        assert!(config.encoder.strict_alignment);
        assert_eq!(config.encoder.default_sample_rate, 24000);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_validate_rejects_zero_rate() {
        let config = EncoderConfig {
            default_sample_rate: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_validate_bounds_max_pcm_bytes() {
        let config = EncoderConfig {
            max_pcm_bytes: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let config = EncoderConfig {
            max_pcm_bytes: MAX_PCM_LEN,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
