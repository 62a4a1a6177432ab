//! Game configuration
//!
//! Optional overrides are persisted separately from game saves in
//! LocalStorage; every field falls back to its default.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::persistence::{Records, Store};

/// Level at which clearing the round wins the game
pub const DEFAULT_MAX_LEVEL: u32 = 40;
/// Gap between pad flashes during playback (ms)
pub const DEFAULT_SEQUENCE_DELAY_MS: u64 = 800;
/// How long a pad stays lit (ms)
pub const DEFAULT_FLASH_DURATION_MS: u64 = 300;
/// Pause before replaying after a wrong move (ms)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;
/// Pause between a cleared round and the next one (ms)
pub const DEFAULT_ADVANCE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub max_level: u32,
    #[serde(rename = "sequenceDelay")]
    pub sequence_delay_ms: u64,
    #[serde(rename = "flashDuration")]
    pub flash_duration_ms: u64,
    #[serde(rename = "retryDelay")]
    pub retry_delay_ms: u64,
    #[serde(rename = "advanceDelay")]
    pub advance_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            sequence_delay_ms: DEFAULT_SEQUENCE_DELAY_MS,
            flash_duration_ms: DEFAULT_FLASH_DURATION_MS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Record name for stored overrides
    const STORAGE_KEY: &'static str = "config";

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_level == 0 {
            return Err(ConfigError::InvalidMaxLevel);
        }
        if self.sequence_delay_ms == 0 {
            return Err(ConfigError::InvalidSequenceDelay);
        }
        Ok(self)
    }

    /// Load overrides from the store, falling back to defaults
    pub fn load<S: Store>(store: S) -> Self {
        let records = Records::new(store);
        let Some(config) = records.load::<GameConfig>(Self::STORAGE_KEY) else {
            log::info!("Using default config");
            return Self::default();
        };

        match config.validate() {
            Ok(config) => {
                log::info!("Loaded config (max level {})", config.max_level);
                config
            }
            Err(e) => {
                log::warn!("Ignoring stored config: {e}");
                Self::default()
            }
        }
    }
}
