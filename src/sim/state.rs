//! Game phases and outcome events
//!
//! The controller never touches the DOM; it emits `GameEvent`s and the host
//! reacts (flash pads, play tones, show toasts, update the HUD).

use super::color::Color;

/// Current phase of the round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No game started yet
    Idle,
    /// Machine is playing the sequence back
    PresentingSequence,
    /// Waiting for the player's pad presses
    AwaitingInput,
    /// Round cleared, next one starts after a short pause
    RoundAdvancing,
    /// Final level cleared
    GameWon,
    /// Strict-mode mismatch ended the run
    GameOver,
}

impl GamePhase {
    /// Terminal phases only leave via a fresh `start()`
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameWon | GamePhase::GameOver)
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NoticeKind {
    /// CSS suffix (`toast-success`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
        }
    }
}

/// A player-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub duration_ms: u32,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            kind,
            message: message.into(),
            duration_ms,
        }
    }
}

/// Things the UI layer reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Level display changed
    LevelChanged { level: u32 },
    /// High score display changed
    HighScore { high_score: u32 },
    /// Light a pad during playback (step `index` of the sequence)
    Flash { index: usize, color: Color },
    /// Playback finished, pads are live
    AwaitingInput,
    /// Echo of an accepted player press
    PadPressed { color: Color },
    /// Toast message
    Notice(Notice),
    /// Strict-mode loss
    GameOver { level: u32 },
    /// Final level cleared
    GameWon { level: u32 },
}
