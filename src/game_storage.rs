//! Saved game and high score
//!
//! Persisted to LocalStorage under its own key, separate from analytics.
//! Nothing is cached: every call re-reads the store.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::{Records, Store};
use crate::platform::Clock;
use crate::sim::Color;

/// The persisted game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub level: u32,
    pub sequence: Vec<Color>,
    pub high_score: u32,
    pub last_played: DateTime<Utc>,
}

pub struct GameStorage<S, C> {
    records: Records<S>,
    clock: C,
}

impl<S: Store, C: Clock> GameStorage<S, C> {
    /// Record name (stored as `timon_game_state`)
    const STORAGE_KEY: &'static str = "game_state";

    pub fn new(store: S, clock: C) -> Self {
        Self {
            records: Records::new(store),
            clock,
        }
    }

    /// Overwrite the saved game, carrying the high score forward
    pub fn save_game(&self, level: u32, sequence: &[Color]) -> Result<(), PersistenceError> {
        let previous = self.load_game().map(|s| s.high_score).unwrap_or(0);
        let state = GameState {
            level,
            sequence: sequence.to_vec(),
            high_score: previous.max(level),
            last_played: self.clock.now(),
        };
        self.records.save(Self::STORAGE_KEY, &state)?;
        log::info!("Game saved (level {level})");
        Ok(())
    }

    pub fn load_game(&self) -> Option<GameState> {
        self.records.load(Self::STORAGE_KEY)
    }

    pub fn high_score(&self) -> u32 {
        self.load_game().map(|s| s.high_score).unwrap_or(0)
    }

    /// A game is resumable once it has reached level 1
    pub fn has_saved_game(&self) -> bool {
        self.load_game().is_some_and(|s| s.level > 0)
    }

    /// Saved game played within `window` of now
    pub fn has_recent_game(&self, window: TimeDelta) -> bool {
        if !self.has_saved_game() {
            return false;
        }
        self.last_played()
            .is_some_and(|last| self.clock.now() - last < window)
    }

    pub fn clear_game(&self) {
        self.records.remove(Self::STORAGE_KEY);
        log::info!("Saved game cleared");
    }

    /// Raise the stored high score. No-op without a saved game or if
    /// `level` does not beat it.
    pub fn update_high_score(&self, level: u32) -> Result<(), PersistenceError> {
        let Some(mut state) = self.load_game() else {
            return Ok(());
        };
        if level <= state.high_score {
            return Ok(());
        }
        state.high_score = level;
        self.records.save(Self::STORAGE_KEY, &state)
    }

    pub fn last_played(&self) -> Option<DateTime<Utc>> {
        self.load_game().map(|s| s.last_played)
    }
}
