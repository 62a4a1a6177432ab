//! Lifetime play statistics
//!
//! Persisted to LocalStorage under its own key. Updated once per finished
//! game, never mid-round.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::{Records, Store};
use crate::platform::Clock;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub games_played: u32,
    pub games_won: u32,
    pub highest_level: u32,
    /// Total play time across finished games (ms)
    #[serde(rename = "totalTime")]
    pub total_time_ms: u64,
    /// Running mean of final levels
    pub average_level: f64,
}

/// The figures shown on the stats panel
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub games_played: u32,
    /// Percent
    pub win_rate: f64,
    pub highest_level: u32,
    pub average_level: f64,
    /// Seconds
    pub average_game_time: f64,
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games Played:   {}", self.games_played)?;
        writeln!(f, "Win Rate:       {:.1}%", self.win_rate)?;
        writeln!(f, "Highest Level:  {}", self.highest_level)?;
        writeln!(f, "Average Level:  {:.1}", self.average_level)?;
        write!(f, "Avg. Game Time: {:.0}s", self.average_game_time)
    }
}

pub struct Analytics<S, C> {
    records: Records<S>,
    clock: C,
    session_start: Option<DateTime<Utc>>,
}

impl<S: Store, C: Clock> Analytics<S, C> {
    /// Record name (stored as `timon_analytics`)
    const STORAGE_KEY: &'static str = "analytics";

    pub fn new(store: S, clock: C) -> Self {
        Self {
            records: Records::new(store),
            clock,
            session_start: None,
        }
    }

    /// Mark the start of a game. Calling again restarts the timer.
    pub fn start_session(&mut self) {
        self.session_start = Some(self.clock.now());
    }

    /// Fold a finished game into the stats and persist them
    pub fn end_session(&mut self, level: u32, won: bool) -> Result<(), PersistenceError> {
        let elapsed_ms = match self.session_start.take() {
            Some(start) => (self.clock.now() - start).num_milliseconds().max(0) as u64,
            None => {
                log::warn!("end_session without start_session, not counting time");
                0
            }
        };

        let mut stats = self.stats();
        stats.games_played += 1;
        if won {
            stats.games_won += 1;
        }
        stats.highest_level = stats.highest_level.max(level);
        stats.total_time_ms += elapsed_ms;
        let n = f64::from(stats.games_played);
        stats.average_level = (stats.average_level * (n - 1.0) + f64::from(level)) / n;

        log::info!(
            "Session ended at level {level} ({}), {} games played",
            if won { "won" } else { "lost" },
            stats.games_played
        );
        self.records.save(Self::STORAGE_KEY, &stats)
    }

    /// Stored stats, zeroed if absent or unreadable
    pub fn stats(&self) -> GameStats {
        self.records.load(Self::STORAGE_KEY).unwrap_or_default()
    }

    /// Percentage of games won
    pub fn win_rate(&self) -> f64 {
        let stats = self.stats();
        if stats.games_played == 0 {
            return 0.0;
        }
        f64::from(stats.games_won) / f64::from(stats.games_played) * 100.0
    }

    /// Mean game length in seconds
    pub fn average_game_time(&self) -> f64 {
        let stats = self.stats();
        if stats.games_played == 0 {
            return 0.0;
        }
        stats.total_time_ms as f64 / f64::from(stats.games_played) / 1000.0
    }

    pub fn summary(&self) -> StatsSummary {
        let stats = self.stats();
        StatsSummary {
            games_played: stats.games_played,
            win_rate: self.win_rate(),
            highest_level: stats.highest_level,
            average_level: stats.average_level,
            average_game_time: self.average_game_time(),
        }
    }

    pub fn reset(&self) {
        self.records.remove(Self::STORAGE_KEY);
        log::info!("Statistics reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::ManualClock;
    use proptest::prelude::*;

    fn analytics() -> (Analytics<MemoryStore, ManualClock>, MemoryStore, ManualClock) {
        let store = MemoryStore::new();
        let clock = ManualClock::default();
        (Analytics::new(store.clone(), clock.clone()), store, clock)
    }

    #[test]
    fn test_zero_games_no_division() {
        let (analytics, _, _) = analytics();
        assert_eq!(analytics.stats(), GameStats::default());
        assert_eq!(analytics.win_rate(), 0.0);
        assert_eq!(analytics.average_game_time(), 0.0);
    }

    #[test]
    fn test_end_session_updates_stats() {
        let (mut analytics, _, clock) = analytics();

        analytics.start_session();
        clock.advance_ms(30_000);
        analytics.end_session(5, false).unwrap();

        analytics.start_session();
        clock.advance_ms(90_000);
        analytics.end_session(10, true).unwrap();

        let stats = analytics.stats();
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.highest_level, 10);
        assert_eq!(stats.total_time_ms, 120_000);
        assert!((stats.average_level - 7.5).abs() < 1e-9);
        assert!((analytics.win_rate() - 50.0).abs() < 1e-9);
        assert!((analytics.average_game_time() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_start_session_restarts_timer() {
        let (mut analytics, _, clock) = analytics();
        analytics.start_session();
        clock.advance_ms(10_000);
        analytics.start_session();
        clock.advance_ms(4_000);
        analytics.end_session(1, false).unwrap();
        assert_eq!(analytics.stats().total_time_ms, 4_000);

        // The session was consumed: a second end adds no time
        clock.advance_ms(5_000);
        analytics.end_session(1, false).unwrap();
        assert_eq!(analytics.stats().total_time_ms, 4_000);
    }

    #[test]
    fn test_end_without_start_counts_no_time() {
        let (mut analytics, _, clock) = analytics();
        clock.advance_ms(10_000);
        analytics.end_session(3, false).unwrap();
        let stats = analytics.stats();
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.total_time_ms, 0);
    }

    #[test]
    fn test_json_layout() {
        let (mut analytics, store, _) = analytics();
        analytics.start_session();
        analytics.end_session(4, true).unwrap();

        let raw = store.read("timon_analytics").unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["gamesPlayed"], 1);
        assert_eq!(value["gamesWon"], 1);
        assert_eq!(value["highestLevel"], 4);
        assert_eq!(value["totalTime"], 0);
        assert_eq!(value["averageLevel"], 4.0);
    }

    #[test]
    fn test_reset() {
        let (mut analytics, store, _) = analytics();
        analytics.start_session();
        analytics.end_session(4, true).unwrap();
        analytics.reset();
        assert!(!store.contains("timon_analytics"));
        assert_eq!(analytics.stats(), GameStats::default());
    }

    #[test]
    fn test_corrupt_stats_read_as_default() {
        let (mut analytics, store, _) = analytics();
        store.write("timon_analytics", "[1,2,3]").unwrap();
        assert_eq!(analytics.stats(), GameStats::default());

        analytics.start_session();
        analytics.end_session(2, false).unwrap();
        assert_eq!(analytics.stats().games_played, 1);
    }

    #[test]
    fn test_summary_display() {
        let (mut analytics, _, clock) = analytics();
        analytics.start_session();
        clock.advance_ms(42_000);
        analytics.end_session(3, true).unwrap();

        let text = analytics.summary().to_string();
        assert!(text.contains("Games Played:   1"));
        assert!(text.contains("Win Rate:       100.0%"));
        assert!(text.contains("Average Level:  3.0"));
        assert!(text.contains("Avg. Game Time: 42s"));
    }

    proptest! {
        #[test]
        fn prop_running_mean_matches_batch(levels in prop::collection::vec(0u32..100, 1..60)) {
            let (mut analytics, _, _) = analytics();
            for &level in &levels {
                analytics.start_session();
                analytics.end_session(level, false).unwrap();
            }
            let batch = levels.iter().map(|&l| f64::from(l)).sum::<f64>() / levels.len() as f64;
            let stats = analytics.stats();
            prop_assert_eq!(stats.games_played as usize, levels.len());
            prop_assert!((stats.average_level - batch).abs() < 1e-6);
        }
    }
}
