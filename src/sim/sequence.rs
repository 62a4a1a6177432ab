//! Sequence engine
//!
//! Owns the authoritative color sequence and the player's input for the
//! current round, and judges each move against it.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::color::Color;

/// Result of checking one player move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Move differs from the sequence at this position
    Mismatch,
    /// Move is correct, more moves needed
    PartialMatch,
    /// Move is correct and completes the sequence
    FullMatch,
}

#[derive(Debug, Clone)]
pub struct SequenceEngine {
    sequence: Vec<Color>,
    input: Vec<Color>,
    rng: Pcg32,
}

impl SequenceEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            sequence: Vec::new(),
            input: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draw the next color (does not append)
    pub fn next_color(&mut self) -> Color {
        Color::random(&mut self.rng)
    }

    pub fn append_to_sequence(&mut self, color: Color) {
        self.sequence.push(color);
    }

    /// Draw a color, append it, and return it
    pub fn extend(&mut self) -> Color {
        let color = self.next_color();
        self.append_to_sequence(color);
        color
    }

    /// Record a player move and compare it with the sequence at the same index.
    ///
    /// A move past the end of the sequence is a mismatch and is not recorded.
    pub fn record_player_move(&mut self, color: Color) -> MatchResult {
        let index = self.input.len();
        let Some(&expected) = self.sequence.get(index) else {
            return MatchResult::Mismatch;
        };

        self.input.push(color);
        if color != expected {
            MatchResult::Mismatch
        } else if self.input.len() == self.sequence.len() {
            MatchResult::FullMatch
        } else {
            MatchResult::PartialMatch
        }
    }

    /// Clear the player's input, keep the sequence
    pub fn reset_round(&mut self) {
        self.input.clear();
    }

    /// Clear sequence and input
    pub fn reset_all(&mut self) {
        self.sequence.clear();
        self.input.clear();
    }

    /// Replace the sequence (resuming a saved game)
    pub fn restore(&mut self, sequence: Vec<Color>) {
        self.sequence = sequence;
        self.input.clear();
    }

    pub fn sequence(&self) -> &[Color] {
        &self.sequence
    }

    pub fn input(&self) -> &[Color] {
        &self.input
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine_with(sequence: &[Color]) -> SequenceEngine {
        let mut engine = SequenceEngine::new(1);
        for &color in sequence {
            engine.append_to_sequence(color);
        }
        engine
    }

    fn color_strategy() -> impl Strategy<Value = Color> {
        prop::sample::select(Color::ALL.to_vec())
    }

    fn other_color(color: Color) -> Color {
        Color::ALL.into_iter().find(|c| *c != color).unwrap()
    }

    #[test]
    fn test_extend_grows_by_one() {
        let mut engine = SequenceEngine::new(7);
        let color = engine.extend();
        assert_eq!(engine.sequence(), &[color]);
        engine.extend();
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SequenceEngine::new(99);
        let mut b = SequenceEngine::new(99);
        for _ in 0..20 {
            assert_eq!(a.extend(), b.extend());
        }
    }

    #[test]
    fn test_move_on_empty_sequence_is_mismatch() {
        let mut engine = SequenceEngine::new(1);
        assert_eq!(engine.record_player_move(Color::Red), MatchResult::Mismatch);
        assert!(engine.input().is_empty());
    }

    #[test]
    fn test_extra_move_after_full_match_is_not_recorded() {
        let mut engine = engine_with(&[Color::Blue]);
        assert_eq!(engine.record_player_move(Color::Blue), MatchResult::FullMatch);
        assert_eq!(engine.record_player_move(Color::Blue), MatchResult::Mismatch);
        assert_eq!(engine.input().len(), 1);
    }

    #[test]
    fn test_reset_round_keeps_sequence() {
        let mut engine = engine_with(&[Color::Green, Color::Red]);
        engine.record_player_move(Color::Green);
        engine.reset_round();
        assert!(engine.input().is_empty());
        assert_eq!(engine.len(), 2);

        engine.reset_all();
        assert!(engine.is_empty());
    }

    proptest! {
        #[test]
        fn prop_exact_input_matches(seq in prop::collection::vec(color_strategy(), 1..40)) {
            let mut engine = engine_with(&seq);
            let last = seq.len() - 1;
            for (i, &color) in seq.iter().enumerate() {
                let expected = if i == last { MatchResult::FullMatch } else { MatchResult::PartialMatch };
                prop_assert_eq!(engine.record_player_move(color), expected);
            }
            prop_assert!(engine.input().len() <= engine.len());
        }

        #[test]
        fn prop_first_difference_is_mismatch(
            seq in prop::collection::vec(color_strategy(), 1..40),
            pos in any::<prop::sample::Index>(),
        ) {
            let i = pos.index(seq.len());
            let mut engine = engine_with(&seq);
            for &color in &seq[..i] {
                prop_assert_ne!(engine.record_player_move(color), MatchResult::Mismatch);
            }
            prop_assert_eq!(engine.record_player_move(other_color(seq[i])), MatchResult::Mismatch);
        }
    }
}
