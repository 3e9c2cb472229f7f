//! Flush/straight draw detection over combined hole + community cards.
//!
//! Heuristic strategies blend these into hand strength while cards are still
//! to come; a draw is worthless on the river.

use crate::model::card::Card;
use crate::model::street::Street;
use crate::model::suit::Suit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Gutshot,
    OpenEnded,
    FlushDraw,
    /// Simultaneous flush and straight draw.
    ComboDraw,
}

impl DrawKind {
    /// Approximate equity gained per card to come (rule of two: outs x 2%).
    pub const fn equity_per_card(self) -> f64 {
        match self {
            DrawKind::Gutshot => 0.08,
            DrawKind::OpenEnded => 0.16,
            DrawKind::FlushDraw => 0.18,
            DrawKind::ComboDraw => 0.30,
        }
    }
}

/// Detects the strongest draw in the card set. Returns `None` when the cards
/// already contain a made straight or flush, or hold no draw at all.
pub fn detect_draw(cards: &[Card]) -> Option<DrawKind> {
    let flush_draw = has_flush_draw(cards);
    let straight_draw = straight_draw(cards);
    match (flush_draw, straight_draw) {
        (true, Some(_)) => Some(DrawKind::ComboDraw),
        (true, None) => Some(DrawKind::FlushDraw),
        (false, Some(kind)) => Some(kind),
        (false, None) => None,
    }
}

/// Draw equity scaled by how many cards are still to come, used as an
/// additive strength score. Zero on the river.
pub fn draw_potential(cards: &[Card], street: Street) -> f64 {
    let to_come = street.cards_to_come().min(2);
    if to_come == 0 {
        return 0.0;
    }
    match detect_draw(cards) {
        Some(kind) => kind.equity_per_card() * to_come as f64,
        None => 0.0,
    }
}

fn has_flush_draw(cards: &[Card]) -> bool {
    let mut counts = [0usize; 4];
    for card in cards {
        counts[card.suit.index()] += 1;
    }
    Suit::ALL.iter().any(|suit| counts[suit.index()] == 4)
}

fn straight_draw(cards: &[Card]) -> Option<DrawKind> {
    // Rank presence with the ace counted both high and low.
    let mut present = [false; 15];
    for card in cards {
        present[card.rank.value() as usize] = true;
        present[card.rank.low_value() as usize] = true;
    }
    let run = |low: usize, len: usize| (low..low + len).all(|v| present[v]);

    // A made straight is not a draw.
    for low in 1..=10 {
        if run(low, 5) {
            return None;
        }
    }

    // Four consecutive ranks with both extension cards legal.
    for low in 2..=10 {
        if run(low, 4) {
            return Some(DrawKind::OpenEnded);
        }
    }

    // Any five-rank window holding four of its ranks: one card fills it.
    for low in 1..=10 {
        let filled = (low..low + 5).filter(|&v| present[v]).count();
        if filled == 4 {
            return Some(DrawKind::Gutshot);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rank::Rank;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn four_to_a_suit_is_a_flush_draw() {
        let cards = vec![
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Two, Suit::Hearts),
            card(Rank::King, Suit::Spades),
        ];
        assert_eq!(detect_draw(&cards), Some(DrawKind::FlushDraw));
    }

    #[test]
    fn open_ended_run_detected() {
        let cards = vec![
            card(Rank::Six, Suit::Hearts),
            card(Rank::Seven, Suit::Spades),
            card(Rank::Eight, Suit::Diamonds),
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Two, Suit::Hearts),
        ];
        assert_eq!(detect_draw(&cards), Some(DrawKind::OpenEnded));
    }

    #[test]
    fn ace_low_run_is_only_a_gutshot() {
        // A-2-3-4 can only be completed by a five.
        let cards = vec![
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Two, Suit::Spades),
            card(Rank::Three, Suit::Diamonds),
            card(Rank::Four, Suit::Clubs),
            card(Rank::Nine, Suit::Hearts),
        ];
        assert_eq!(detect_draw(&cards), Some(DrawKind::Gutshot));
    }

    #[test]
    fn interior_gap_is_a_gutshot() {
        let cards = vec![
            card(Rank::Five, Suit::Hearts),
            card(Rank::Six, Suit::Spades),
            card(Rank::Eight, Suit::Diamonds),
            card(Rank::Nine, Suit::Clubs),
            card(Rank::King, Suit::Hearts),
        ];
        assert_eq!(detect_draw(&cards), Some(DrawKind::Gutshot));
    }

    #[test]
    fn made_straight_is_not_a_draw() {
        let cards = vec![
            card(Rank::Five, Suit::Hearts),
            card(Rank::Six, Suit::Spades),
            card(Rank::Seven, Suit::Diamonds),
            card(Rank::Eight, Suit::Clubs),
            card(Rank::Nine, Suit::Hearts),
        ];
        assert_eq!(detect_draw(&cards), None);
    }

    #[test]
    fn combo_draw_outranks_either_alone() {
        let cards = vec![
            card(Rank::Six, Suit::Hearts),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Nine, Suit::Hearts),
        ];
        assert_eq!(detect_draw(&cards), Some(DrawKind::ComboDraw));
        assert!(
            DrawKind::ComboDraw.equity_per_card() > DrawKind::FlushDraw.equity_per_card()
        );
    }

    #[test]
    fn draw_potential_vanishes_on_the_river() {
        let cards = vec![
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Two, Suit::Hearts),
            card(Rank::King, Suit::Spades),
        ];
        assert!(draw_potential(&cards, Street::Flop) > 0.0);
        assert!(draw_potential(&cards, Street::Flop) > draw_potential(&cards, Street::Turn));
        assert_eq!(draw_potential(&cards, Street::River), 0.0);
    }
}
