//! Combinatorial hand ranking with poker tie-break ordering.
//!
//! This module is composed of:
//! - `category`: the ten hand categories and their coarse base equities.
//! - `strength`: street-scaled win-probability heuristics and preflop equity.
//! - `draws`: flush/straight draw detection for the heuristic strategies.

mod category;
pub mod draws;
pub mod strength;

pub use category::HandCategory;

use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Best five-card hand found in a 5-7 card set, with the ordered cards that
/// decide ties. Produced fresh on every evaluation; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub category: HandCategory,
    /// The five cards that decide the hand, strongest tie-break first. Empty
    /// only for the incomplete sentinel.
    pub tiebreak: Vec<Card>,
    pub description: String,
}

impl HandResult {
    fn new(category: HandCategory, tiebreak: Vec<Card>, description: String) -> Self {
        debug_assert_eq!(tiebreak.len(), 5);
        Self {
            category,
            tiebreak,
            description,
        }
    }

    /// Sentinel returned when fewer than five cards are supplied.
    pub fn incomplete() -> Self {
        Self {
            category: HandCategory::HighCard,
            tiebreak: Vec::new(),
            description: "incomplete hand".to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.tiebreak.is_empty()
    }

    pub fn strength_rank(&self) -> u8 {
        self.category.strength_rank()
    }
}

impl fmt::Display for HandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Calling-convention violations that are the caller's responsibility.
/// Short hands are NOT an error; they yield the incomplete sentinel.
#[derive(Debug, PartialEq, Eq)]
pub enum EvalError {
    NoCards,
    TooManyCards(usize),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::NoCards => write!(f, "evaluator called with zero cards"),
            EvalError::TooManyCards(count) => {
                write!(f, "evaluator called with {count} cards (maximum 7)")
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Ranks a 5-7 card set into its best five-card poker hand.
pub fn evaluate(cards: &[Card]) -> Result<HandResult, EvalError> {
    match cards.len() {
        0 => Err(EvalError::NoCards),
        1..=4 => Ok(HandResult::incomplete()),
        5..=7 => Ok(evaluate_complete(cards)),
        count => Err(EvalError::TooManyCards(count)),
    }
}

/// Orders two evaluated hands: category rank first, then element-wise over
/// the ordered tie-break cards. `Equal` only on an exact rank-sequence tie.
pub fn compare_hands(a: &HandResult, b: &HandResult) -> Ordering {
    a.category
        .strength_rank()
        .cmp(&b.category.strength_rank())
        .then_with(|| {
            for (card_a, card_b) in a.tiebreak.iter().zip(b.tiebreak.iter()) {
                let ord = card_a.rank.value().cmp(&card_b.rank.value());
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        })
}

fn evaluate_complete(cards: &[Card]) -> HandResult {
    let mut sorted: Vec<Card> = cards.to_vec();
    sorted.sort_by(|a, b| b.rank.cmp(&a.rank));

    // Categories are checked in strictly descending strength order; the
    // first match wins.
    if let Some(suit) = flush_suit(&sorted) {
        let suited: Vec<Card> = sorted.iter().copied().filter(|c| c.suit == suit).collect();
        if let Some(run) = straight_run(&suited) {
            return if run[0].rank == Rank::Ace && run[1].rank == Rank::King {
                HandResult::new(HandCategory::RoyalFlush, run, "royal flush".to_string())
            } else {
                let high = run[0].rank;
                HandResult::new(
                    HandCategory::StraightFlush,
                    run,
                    format!("straight flush, {}-high", rank_word(high)),
                )
            };
        }
    }

    let groups = rank_groups(&sorted);

    if groups[0].0 == 4 {
        let quad_rank = groups[0].1;
        let mut tiebreak = take_rank(&sorted, quad_rank, 4);
        tiebreak.extend(kickers(&sorted, &[quad_rank], 1));
        return HandResult::new(
            HandCategory::FourOfAKind,
            tiebreak,
            format!("four of a kind, {quad_rank}s"),
        );
    }

    if groups[0].0 >= 3 && groups.len() > 1 && groups[1].0 >= 2 {
        let trips_rank = groups[0].1;
        let pair_rank = groups[1].1;
        let mut tiebreak = take_rank(&sorted, trips_rank, 3);
        tiebreak.extend(take_rank(&sorted, pair_rank, 2));
        return HandResult::new(
            HandCategory::FullHouse,
            tiebreak,
            format!("full house, {trips_rank}s over {pair_rank}s"),
        );
    }

    if let Some(suit) = flush_suit(&sorted) {
        let tiebreak: Vec<Card> = sorted
            .iter()
            .copied()
            .filter(|c| c.suit == suit)
            .take(5)
            .collect();
        let high = tiebreak[0].rank;
        return HandResult::new(
            HandCategory::Flush,
            tiebreak,
            format!("flush, {}-high", rank_word(high)),
        );
    }

    if let Some(run) = straight_run(&sorted) {
        let high = run[0].rank;
        return HandResult::new(
            HandCategory::Straight,
            run,
            format!("straight, {}-high", rank_word(high)),
        );
    }

    if groups[0].0 == 3 {
        let trips_rank = groups[0].1;
        let mut tiebreak = take_rank(&sorted, trips_rank, 3);
        tiebreak.extend(kickers(&sorted, &[trips_rank], 2));
        return HandResult::new(
            HandCategory::ThreeOfAKind,
            tiebreak,
            format!("three of a kind, {trips_rank}s"),
        );
    }

    if groups[0].0 == 2 && groups.len() > 1 && groups[1].0 == 2 {
        let high_pair = groups[0].1;
        let low_pair = groups[1].1;
        let mut tiebreak = take_rank(&sorted, high_pair, 2);
        tiebreak.extend(take_rank(&sorted, low_pair, 2));
        tiebreak.extend(kickers(&sorted, &[high_pair, low_pair], 1));
        return HandResult::new(
            HandCategory::TwoPair,
            tiebreak,
            format!("two pair, {high_pair}s and {low_pair}s"),
        );
    }

    if groups[0].0 == 2 {
        let pair_rank = groups[0].1;
        let mut tiebreak = take_rank(&sorted, pair_rank, 2);
        tiebreak.extend(kickers(&sorted, &[pair_rank], 3));
        return HandResult::new(
            HandCategory::Pair,
            tiebreak,
            format!("pair of {pair_rank}s"),
        );
    }

    let tiebreak: Vec<Card> = sorted.iter().copied().take(5).collect();
    let high = tiebreak[0].rank;
    HandResult::new(
        HandCategory::HighCard,
        tiebreak,
        format!("high card, {}", rank_word(high)),
    )
}

/// Suit holding five or more of the cards, if any.
fn flush_suit(cards: &[Card]) -> Option<Suit> {
    let mut counts = [0usize; 4];
    for card in cards {
        counts[card.suit.index()] += 1;
    }
    Suit::ALL
        .iter()
        .copied()
        .find(|suit| counts[suit.index()] >= 5)
}

/// Highest five-card run in a rank-descending card list, one card per rank.
/// The wheel (A-2-3-4-5) is recognized last and returned five-high with the
/// ace in the low slot.
fn straight_run(sorted: &[Card]) -> Option<Vec<Card>> {
    let mut unique: Vec<Card> = Vec::with_capacity(sorted.len());
    for &card in sorted {
        if unique.last().map(|c| c.rank) != Some(card.rank) {
            unique.push(card);
        }
    }

    if unique.len() >= 5 {
        for start in 0..=unique.len() - 5 {
            let window = &unique[start..start + 5];
            let consecutive = window
                .windows(2)
                .all(|pair| pair[0].rank.value() == pair[1].rank.value() + 1);
            if consecutive {
                return Some(window.to_vec());
            }
        }
    }

    let find = |rank: Rank| unique.iter().copied().find(|c| c.rank == rank);
    match (
        find(Rank::Five),
        find(Rank::Four),
        find(Rank::Three),
        find(Rank::Two),
        find(Rank::Ace),
    ) {
        (Some(five), Some(four), Some(three), Some(two), Some(ace)) => {
            Some(vec![five, four, three, two, ace])
        }
        _ => None,
    }
}

/// Rank multiplicities, largest group first, higher rank breaking count ties.
fn rank_groups(sorted: &[Card]) -> Vec<(usize, Rank)> {
    let mut groups: Vec<(usize, Rank)> = Vec::new();
    for card in sorted {
        match groups.iter_mut().find(|(_, rank)| *rank == card.rank) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, card.rank)),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    groups
}

fn take_rank(sorted: &[Card], rank: Rank, count: usize) -> Vec<Card> {
    sorted
        .iter()
        .copied()
        .filter(|c| c.rank == rank)
        .take(count)
        .collect()
}

fn kickers(sorted: &[Card], exclude: &[Rank], count: usize) -> Vec<Card> {
    sorted
        .iter()
        .copied()
        .filter(|c| !exclude.contains(&c.rank))
        .take(count)
        .collect()
}

fn rank_word(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "two",
        Rank::Three => "three",
        Rank::Four => "four",
        Rank::Five => "five",
        Rank::Six => "six",
        Rank::Seven => "seven",
        Rank::Eight => "eight",
        Rank::Nine => "nine",
        Rank::Ten => "ten",
        Rank::Jack => "jack",
        Rank::Queen => "queen",
        Rank::King => "king",
        Rank::Ace => "ace",
    }
}
