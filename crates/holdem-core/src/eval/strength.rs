//! Coarse hand-strength heuristics: category base equity scaled by street,
//! plus a preflop equity table for the hole-cards-only case.

use crate::eval::{self, HandResult};
use crate::model::card::Card;
use crate::model::street::Street;

pub const PREFLOP_MIN_STRENGTH: f64 = 0.35;
pub const PREFLOP_MAX_STRENGTH: f64 = 0.90;

/// Street scaling applied to the per-category base probability: a made hand
/// is worth less while cards are still to come.
pub const fn street_factor(street: Street) -> f64 {
    match street {
        Street::Preflop => 0.5,
        Street::Flop => 0.8,
        Street::Turn => 0.9,
        Street::River => 1.0,
    }
}

/// Category base probability times the street factor. A fallback strength
/// signal for strategies that do not run a full rollout.
pub fn win_probability(result: &HandResult, community_count: usize) -> f64 {
    let street = Street::from_community_count(community_count);
    result.category.base_win_probability() * street_factor(street)
}

/// Preflop equity keyed by high/low rank, pair-ness and suitedness, clamped
/// to [0.35, 0.90]. No board exists yet, so this is the whole signal.
pub fn preflop_strength(hole: [Card; 2]) -> f64 {
    let high = hole[0].rank.value().max(hole[1].rank.value()) as f64;
    let low = hole[0].rank.value().min(hole[1].rank.value()) as f64;
    let suited = hole[0].suit == hole[1].suit;
    let gap = high - low;

    if hole[0].rank == hole[1].rank {
        // 22 = 0.50 up to AA = 0.872.
        let strength = 0.50 + (low - 2.0) * 0.031;
        return strength.clamp(PREFLOP_MIN_STRENGTH, PREFLOP_MAX_STRENGTH);
    }

    let mut strength = 0.22 + (high - 2.0) * 0.022 + (low - 2.0) * 0.010;
    if suited {
        strength += 0.05;
    }
    if gap == 1.0 {
        strength += 0.04;
    } else if gap == 2.0 {
        strength += 0.02;
    }
    if hole[0].rank.is_broadway() && hole[1].rank.is_broadway() {
        strength += 0.05;
    }
    strength.clamp(PREFLOP_MIN_STRENGTH, PREFLOP_MAX_STRENGTH)
}

/// Evaluator-backed strength for the combined hole + community cards, with
/// the preflop table substituted while no board is out.
pub fn hand_strength(hole: [Card; 2], community: &[Card]) -> Result<f64, eval::EvalError> {
    if community.is_empty() {
        return Ok(preflop_strength(hole));
    }
    let mut cards = Vec::with_capacity(2 + community.len());
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(community);
    let result = eval::evaluate(&cards)?;
    Ok(win_probability(&result, community.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::evaluate;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn street_factor_increases_toward_river() {
        assert!(street_factor(Street::Preflop) < street_factor(Street::Flop));
        assert!(street_factor(Street::Flop) < street_factor(Street::Turn));
        assert!(street_factor(Street::Turn) < street_factor(Street::River));
        assert!((street_factor(Street::River) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn river_flush_outranks_flop_flush_probability() {
        let cards = [
            card(Rank::Two, Suit::Hearts),
            card(Rank::Five, Suit::Hearts),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Jack, Suit::Hearts),
            card(Rank::King, Suit::Hearts),
        ];
        let result = evaluate(&cards).unwrap();
        assert!(win_probability(&result, 5) > win_probability(&result, 3));
    }

    #[test]
    fn pocket_aces_near_preflop_ceiling() {
        let aa = preflop_strength([
            card(Rank::Ace, Suit::Spades),
            card(Rank::Ace, Suit::Hearts),
        ]);
        assert!(aa > 0.85);
        assert!(aa <= PREFLOP_MAX_STRENGTH);
    }

    #[test]
    fn junk_clamps_to_preflop_floor() {
        let junk = preflop_strength([
            card(Rank::Seven, Suit::Spades),
            card(Rank::Two, Suit::Hearts),
        ]);
        assert!((junk - PREFLOP_MIN_STRENGTH).abs() < 1e-9);
    }

    #[test]
    fn suited_and_connected_add_equity() {
        let offsuit = preflop_strength([
            card(Rank::King, Suit::Spades),
            card(Rank::Queen, Suit::Hearts),
        ]);
        let suited = preflop_strength([
            card(Rank::King, Suit::Spades),
            card(Rank::Queen, Suit::Spades),
        ]);
        assert!(suited > offsuit);
    }

    #[test]
    fn hand_strength_uses_preflop_table_without_board() {
        let hole = [
            card(Rank::Ace, Suit::Spades),
            card(Rank::King, Suit::Spades),
        ];
        let strength = hand_strength(hole, &[]).unwrap();
        assert_eq!(strength, preflop_strength(hole));
    }
}
