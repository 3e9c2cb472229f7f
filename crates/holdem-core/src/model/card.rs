use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Dense 0..52 identifier (suit-major), used for deck construction.
    pub const fn id(self) -> u8 {
        (self.suit as u8) * 13 + (self.rank as u8 - 2)
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        if id >= 52 {
            return None;
        }
        let suit = match Suit::from_index((id / 13) as usize) {
            Some(suit) => suit,
            None => return None,
        };
        let rank = match Rank::from_value(id % 13 + 2) {
            Some(rank) => rank,
            None => return None,
        };
        Some(Self { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};

    #[test]
    fn id_roundtrip_covers_deck() {
        for id in 0..52u8 {
            let card = Card::from_id(id).expect("valid id");
            assert_eq!(card.id(), id);
        }
        assert_eq!(Card::from_id(52), None);
    }

    #[test]
    fn display_is_rank_then_suit() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(card.to_string(), "As");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10h");
    }
}
