use core::fmt;
use serde::{Deserialize, Serialize};

/// Betting round, keyed by how many community cards are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Community-card counts other than 0/3/4/5 do not occur in hold'em;
    /// anything past the turn is treated as the river.
    pub const fn from_community_count(count: usize) -> Self {
        match count {
            0 => Street::Preflop,
            1..=3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    pub const fn community_count(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub const fn cards_to_come(self) -> usize {
        5 - self.community_count()
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(label)
    }
}
