//! Application state management

use std::sync::Arc;
use voxbox_core::{AudioEncoder, VoxboxConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub encoder: Arc<AudioEncoder>,
    pub config: Arc<VoxboxConfig>,
}

impl AppState {
    pub fn new(config: VoxboxConfig) -> Self {
        Self {
            encoder: Arc::new(AudioEncoder::from_config(&config.encoder)),
            config: Arc::new(config),
        }
    }

    pub fn max_pcm_bytes(&self) -> usize {
        self.config.encoder.max_pcm_bytes
    }
}
