//! Engine configuration.

use std::path::Path;

use cs_audio::OutputConfig;
use cs_engine::{DEFAULT_MASTER_VOLUME, DEFAULT_NOISE_SEED};
use serde::{Deserialize, Serialize};

/// Error loading an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for a [`crate::Controller`]. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Starting master volume (clamped to 0-1)
    pub master_volume: f32,
    /// Device callback size in frames; `None` leaves it to the device
    pub buffer_frames: Option<u32>,
    /// Snapshots the hand-off ring can hold before publishes spill into the overflow slot
    pub handoff_capacity: usize,
    /// Seed for the noise voice's LFSR (0 is replaced by the default seed)
    pub noise_seed: u16,
    /// Sample rate used for offline rendering
    pub render_sample_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            master_volume: DEFAULT_MASTER_VOLUME,
            buffer_frames: Some(2048),
            handoff_capacity: 64,
            noise_seed: DEFAULT_NOISE_SEED,
            render_sample_rate: 44100,
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Device settings derived from this config.
    pub fn output(&self) -> OutputConfig {
        OutputConfig {
            buffer_frames: self.buffer_frames,
        }
    }
}
