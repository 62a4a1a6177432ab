//! Pad colors

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the four pads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Blue,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Green, Color::Red, Color::Blue, Color::Yellow];

    /// Uniform draw, independent of anything drawn before
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// CSS class / storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }

    /// Pad tone in Hz (the classic Simon pitches)
    pub fn tone_hz(&self) -> f32 {
        match self {
            Color::Green => 415.3,
            Color::Red => 310.0,
            Color::Yellow => 252.0,
            Color::Blue => 209.0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_serialized_as_lowercase() {
        let json = serde_json::to_string(&[Color::Green, Color::Yellow]).unwrap();
        assert_eq!(json, r#"["green","yellow"]"#);
        assert!(serde_json::from_str::<Color>(r#""purple""#).is_err());
    }

    #[test]
    fn test_random_covers_all_colors() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut counts = [0u32; 4];
        for _ in 0..4000 {
            let color = Color::random(&mut rng);
            let idx = Color::ALL.iter().position(|c| *c == color).unwrap();
            counts[idx] += 1;
        }
        // Roughly uniform: each pad near 1000
        for count in counts {
            assert!((800..1200).contains(&count), "skewed draw: {counts:?}");
        }
    }
}
