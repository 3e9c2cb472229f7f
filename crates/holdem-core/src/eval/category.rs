use core::fmt;
use serde::{Deserialize, Serialize};

/// The ten poker hand categories, ordered weakest to strongest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    pub const fn strength_rank(self) -> u8 {
        self as u8
    }

    /// Coarse per-category win probability, used as a fallback strength
    /// signal when no full equity computation is available.
    pub const fn base_win_probability(self) -> f64 {
        match self {
            HandCategory::HighCard => 0.25,
            HandCategory::Pair => 0.40,
            HandCategory::TwoPair => 0.50,
            HandCategory::ThreeOfAKind => 0.60,
            HandCategory::Straight => 0.70,
            HandCategory::Flush => 0.75,
            HandCategory::FullHouse => 0.85,
            HandCategory::FourOfAKind => 0.90,
            HandCategory::StraightFlush => 0.95,
            HandCategory::RoyalFlush => 0.99,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "high card",
            HandCategory::Pair => "pair",
            HandCategory::TwoPair => "two pair",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full house",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::StraightFlush => "straight flush",
            HandCategory::RoyalFlush => "royal flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
