//! Read-only game-state snapshot consumed by the decision engine, and the
//! `Decision` value it hands back. The surrounding table/turn state machine
//! owns the mutable game state; the engine never applies its own decisions.

use crate::model::card::Card;
use crate::model::street::Street;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable opaque identity for an opponent. Display names are not guaranteed
/// unique, so behavioral models key on this instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
}

/// The last public action an opponent took, as reported by the table state
/// machine after every opponent move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedAction {
    pub kind: ActionKind,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpponentState {
    pub id: PlayerId,
    pub folded: bool,
    pub active: bool,
    pub chips: u32,
    pub last_action: Option<ObservedAction>,
}

impl OpponentState {
    pub fn is_live(&self) -> bool {
        self.active && !self.folded
    }
}

/// Immutable view of the table for the duration of one decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub pot: u32,
    pub to_call: u32,
    pub big_blind: u32,
    pub min_raise: u32,
    pub community: Vec<Card>,
    pub opponents: Vec<OpponentState>,
    pub hero_seat: usize,
    pub button_seat: usize,
    pub player_count: usize,
    pub hero_chips: u32,
    pub hero_bet: u32,
}

impl GameStateSnapshot {
    pub fn street(&self) -> Street {
        Street::from_community_count(self.community.len())
    }

    /// Opponents still contesting the pot. An empty or degenerate opponent
    /// list is the caller's bug; consumers substitute a safe default count.
    pub fn live_opponents(&self) -> impl Iterator<Item = &OpponentState> {
        self.opponents.iter().filter(|opp| opp.is_live())
    }

    pub fn live_opponent_count(&self) -> usize {
        self.live_opponents().count()
    }
}

/// The engine's sole output. Amounts are implicit zero for fold/check and
/// the full call amount for call; only raise carries an explicit size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Fold,
    Check,
    Call,
    Raise(u32),
}

impl Decision {
    pub const fn amount(self) -> u32 {
        match self {
            Decision::Raise(amount) => amount,
            _ => 0,
        }
    }

    pub const fn is_aggressive(self) -> bool {
        matches!(self, Decision::Raise(_))
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Fold => f.write_str("fold"),
            Decision::Check => f.write_str("check"),
            Decision::Call => f.write_str("call"),
            Decision::Raise(amount) => write!(f, "raise {amount}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn sample_snapshot() -> GameStateSnapshot {
        GameStateSnapshot {
            pot: 120,
            to_call: 40,
            big_blind: 20,
            min_raise: 40,
            community: vec![
                Card::new(Rank::Ace, Suit::Spades),
                Card::new(Rank::Ten, Suit::Hearts),
                Card::new(Rank::Two, Suit::Clubs),
            ],
            opponents: vec![
                OpponentState {
                    id: PlayerId(1),
                    folded: false,
                    active: true,
                    chips: 900,
                    last_action: Some(ObservedAction {
                        kind: ActionKind::Raise,
                        amount: 40,
                    }),
                },
                OpponentState {
                    id: PlayerId(2),
                    folded: true,
                    active: false,
                    chips: 500,
                    last_action: Some(ObservedAction {
                        kind: ActionKind::Fold,
                        amount: 0,
                    }),
                },
            ],
            hero_seat: 0,
            button_seat: 2,
            player_count: 3,
            hero_chips: 1000,
            hero_bet: 20,
        }
    }

    #[test]
    fn street_follows_community_count() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.street(), Street::Flop);
    }

    #[test]
    fn live_opponents_excludes_folded() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.live_opponent_count(), 1);
        assert_eq!(snapshot.live_opponents().next().unwrap().id, PlayerId(1));
    }

    #[test]
    fn decision_amount_is_zero_except_raise() {
        assert_eq!(Decision::Fold.amount(), 0);
        assert_eq!(Decision::Check.amount(), 0);
        assert_eq!(Decision::Call.amount(), 0);
        assert_eq!(Decision::Raise(75).amount(), 75);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = sample_snapshot();
        let encoded = serde_json::to_string(&snapshot).expect("serialize");
        let decoded: GameStateSnapshot = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded.pot, snapshot.pot);
        assert_eq!(decoded.community, snapshot.community);
        assert_eq!(decoded.opponents.len(), snapshot.opponents.len());
    }
}
