//! Timon - a Simon-style memory sequence game
//!
//! Core modules:
//! - `sim`: Round lifecycle (sequence engine, scheduler, controller)
//! - `persistence`: Key-value store with JSON records
//! - `platform`: Browser/native platform abstraction (storage, time)
//! - `game_storage`: Saved game and high score
//! - `analytics`: Lifetime play statistics
//! - `ui`: Collaborator contracts for the host

pub mod analytics;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod error;
pub mod game_storage;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod ui;

pub use analytics::{Analytics, GameStats, StatsSummary};
pub use config::GameConfig;
pub use error::{ConfigError, PersistenceError};
pub use game_storage::{GameState, GameStorage};
pub use sim::{Color, Controller, GameEvent, GamePhase, MatchResult};
