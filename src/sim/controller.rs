//! Round lifecycle state machine
//!
//! ```text
//! Idle --start--> PresentingSequence --playback done--> AwaitingInput
//! AwaitingInput --press--> AwaitingInput        (partial match)
//!                      --> RoundAdvancing       (full match, below max level)
//!                      --> GameWon              (full match at max level)
//!                      --> PresentingSequence   (mismatch, replay same sequence)
//!                      --> GameOver             (mismatch in strict mode)
//! RoundAdvancing --advance delay--> PresentingSequence (one color longer)
//! GameWon | GameOver --start--> PresentingSequence
//! ```
//!
//! All delays are tasks on the controller's own [`Scheduler`], driven by
//! [`Controller::tick`]. `start` and `reset` cancel every pending task.
//! A single tick advances at most [`MAX_FRAME_MS`], so a long frame (a
//! hidden tab, a debugger pause) slows playback down instead of flashing
//! the whole sequence at once.

use chrono::TimeDelta;

use super::color::Color;
use super::schedule::Scheduler;
use super::sequence::{MatchResult, SequenceEngine};
use super::state::{GameEvent, GamePhase, Notice, NoticeKind};
use crate::analytics::Analytics;
use crate::config::GameConfig;
use crate::game_storage::{GameState, GameStorage};
use crate::persistence::Store;
use crate::platform::Clock;
use crate::ui::Confirm;

pub const RESUME_QUESTION: &str = "Continue your previous game?";
pub const RESET_STATS_QUESTION: &str = "Are you sure you want to reset all statistics?";

/// Longest step one `tick` may advance the game clock
pub const MAX_FRAME_MS: u64 = 100;

/// How old a saved game may be and still get the "in progress" hint
const RECENT_GAME_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    /// Flash step `n` of the sequence
    ShowStep(usize),
    /// Last flash has faded, hand the pads to the player
    FinishPresentation,
    /// Start the next round
    Advance,
}

pub struct Controller<S, C> {
    config: GameConfig,
    phase: GamePhase,
    level: u32,
    high_score: u32,
    strict: bool,
    engine: SequenceEngine,
    storage: GameStorage<S, C>,
    analytics: Analytics<S, C>,
    scheduler: Scheduler<Task>,
    events: Vec<GameEvent>,
}

impl<S: Store + Clone, C: Clock + Clone> Controller<S, C> {
    pub fn new(config: GameConfig, store: S, clock: C, seed: u64) -> Self {
        let storage = GameStorage::new(store.clone(), clock.clone());
        let high_score = storage.high_score();
        Self {
            config,
            phase: GamePhase::Idle,
            level: 0,
            high_score,
            strict: false,
            engine: SequenceEngine::new(seed),
            storage,
            analytics: Analytics::new(store, clock),
            scheduler: Scheduler::new(),
            events: Vec::new(),
        }
    }
}

impl<S: Store, C: Clock> Controller<S, C> {
    /// Begin a game, offering to resume a saved one first
    pub fn start(&mut self, confirm: &mut impl Confirm) {
        self.scheduler.cancel_all();

        match self.storage.load_game() {
            Some(saved) if saved.level > 0 && confirm.confirm(RESUME_QUESTION) => {
                self.restore(saved);
            }
            _ => self.reset_state(),
        }

        self.analytics.start_session();
        self.begin_round();
    }

    /// Abandon the current game and return to `Idle`
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.reset_state();
        self.phase = GamePhase::Idle;
        self.events.push(GameEvent::LevelChanged { level: 0 });
    }

    /// Feed a pad press. Returns `None` if presses are not being accepted.
    pub fn press(&mut self, color: Color) -> Option<MatchResult> {
        if self.phase != GamePhase::AwaitingInput {
            log::debug!("Ignoring {color} press during {:?}", self.phase);
            return None;
        }

        self.events.push(GameEvent::PadPressed { color });
        let result = self.engine.record_player_move(color);
        match result {
            MatchResult::PartialMatch => {}
            MatchResult::FullMatch => self.round_cleared(),
            MatchResult::Mismatch => self.wrong_move(),
        }
        Some(result)
    }

    /// Advance time by `elapsed_ms` (capped at [`MAX_FRAME_MS`]) and run
    /// every task that came due
    pub fn tick(&mut self, elapsed_ms: u64) {
        if elapsed_ms > MAX_FRAME_MS {
            log::trace!("Frame of {elapsed_ms}ms capped to {MAX_FRAME_MS}ms");
        }
        self.scheduler.advance(elapsed_ms.min(MAX_FRAME_MS));
        while let Some(task) = self.scheduler.pop_due() {
            self.run(task);
        }
    }

    /// True while playback or a round advance is still scheduled
    pub fn is_busy(&self) -> bool {
        self.scheduler.pending() > 0
    }

    /// Emit the "game in progress" hint if a recent save exists
    pub fn check_saved_game(&mut self) {
        if self
            .storage
            .has_recent_game(TimeDelta::hours(RECENT_GAME_HOURS))
        {
            self.notify(
                NoticeKind::Info,
                "You have a game in progress! Click Start to continue.",
                4000,
            );
        }
    }

    /// Wipe lifetime statistics after confirmation
    pub fn reset_stats(&mut self, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm(RESET_STATS_QUESTION) {
            return false;
        }
        self.analytics.reset();
        true
    }

    pub fn set_strict_mode(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn strict_mode(&self) -> bool {
        self.strict
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn sequence(&self) -> &[Color] {
        self.engine.sequence()
    }

    pub fn player_input(&self) -> &[Color] {
        self.engine.input()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn storage(&self) -> &GameStorage<S, C> {
        &self.storage
    }

    pub fn analytics(&self) -> &Analytics<S, C> {
        &self.analytics
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Transitions ===

    fn restore(&mut self, saved: GameState) {
        // Roll back one round; begin_round re-adds it
        let keep = saved.level.saturating_sub(1).min(saved.sequence.len() as u32);
        let mut sequence = saved.sequence;
        sequence.truncate(keep as usize);
        self.engine.restore(sequence);
        self.level = keep;

        log::info!("Resuming saved game at level {}", keep + 1);
        self.notify(
            NoticeKind::Info,
            format!("Resuming from Level {}", keep + 1),
            2000,
        );
    }

    fn reset_state(&mut self) {
        self.engine.reset_all();
        self.level = 0;
        self.storage.clear_game();
    }

    /// Level up, extend the sequence, persist, then play it back
    fn begin_round(&mut self) {
        self.level += 1;
        self.engine.reset_round();
        let color = self.engine.extend();
        log::debug!("Level {} adds {color}", self.level);

        if let Err(e) = self.storage.save_game(self.level, self.engine.sequence()) {
            log::warn!("Failed to save game: {e}");
        }
        if let Err(e) = self.storage.update_high_score(self.level) {
            log::warn!("Failed to update high score: {e}");
        }
        self.high_score = self.high_score.max(self.level);

        self.events.push(GameEvent::LevelChanged { level: self.level });
        self.events.push(GameEvent::HighScore {
            high_score: self.high_score,
        });
        self.present(self.config.sequence_delay_ms);
    }

    /// Schedule playback of the whole sequence, first flash after `delay_ms`
    fn present(&mut self, delay_ms: u64) {
        self.phase = GamePhase::PresentingSequence;
        self.scheduler.schedule(delay_ms, Task::ShowStep(0));
    }

    fn round_cleared(&mut self) {
        if self.level >= self.config.max_level {
            log::info!("Game won at level {}", self.level);
            self.storage.clear_game();
            self.finish_session(true);
            self.phase = GamePhase::GameWon;
            self.notify(
                NoticeKind::Success,
                "🎉 Congratulations! You won the game!",
                4000,
            );
            self.events.push(GameEvent::GameWon { level: self.level });
            return;
        }

        self.phase = GamePhase::RoundAdvancing;
        self.notify(
            NoticeKind::Success,
            format!("Level {} completed!", self.level),
            1000,
        );
        self.scheduler
            .schedule(self.config.advance_delay_ms, Task::Advance);
    }

    fn wrong_move(&mut self) {
        if self.strict {
            log::info!("Game over at level {}", self.level);
            self.storage.clear_game();
            self.finish_session(false);
            self.phase = GamePhase::GameOver;
            self.notify(
                NoticeKind::Error,
                "Game Over! Press Start to play again.",
                3000,
            );
            self.events.push(GameEvent::GameOver { level: self.level });
            return;
        }

        self.engine.reset_round();
        self.notify(NoticeKind::Warning, "Wrong move! Try again.", 2000);
        self.present(self.config.retry_delay_ms + self.config.sequence_delay_ms);
    }

    fn finish_session(&mut self, won: bool) {
        if let Err(e) = self.analytics.end_session(self.level, won) {
            log::warn!("Failed to save statistics: {e}");
        }
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::ShowStep(index) => {
                let Some(&color) = self.engine.sequence().get(index) else {
                    return;
                };
                self.events.push(GameEvent::Flash { index, color });
                if index + 1 < self.engine.len() {
                    self.scheduler
                        .schedule(self.config.sequence_delay_ms, Task::ShowStep(index + 1));
                } else {
                    self.scheduler
                        .schedule(self.config.flash_duration_ms, Task::FinishPresentation);
                }
            }
            Task::FinishPresentation => {
                self.phase = GamePhase::AwaitingInput;
                self.events.push(GameEvent::AwaitingInput);
            }
            Task::Advance => self.begin_round(),
        }
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>, duration_ms: u32) {
        self.events
            .push(GameEvent::Notice(Notice::new(kind, message, duration_ms)));
    }
}
