//! Deterministic game logic
//!
//! Everything the round lifecycle needs lives here. This module must stay
//! free of DOM and platform dependencies:
//! - Seeded RNG only
//! - Time only advances through `Controller::tick`
//! - Persistence only through the `Store` trait

pub mod color;
pub mod controller;
pub mod schedule;
pub mod sequence;
pub mod state;

pub use color::Color;
pub use controller::{Controller, MAX_FRAME_MS, RESET_STATS_QUESTION, RESUME_QUESTION};
pub use schedule::Scheduler;
pub use sequence::{MatchResult, SequenceEngine};
pub use state::{GameEvent, GamePhase, Notice, NoticeKind};
