//! Two-player minimax over a small betting tree. The opponent's unknown
//! range is collapsed to a single uniformly sampled strength per min node,
//! which keeps the tree tiny at the cost of noisy adversarial replies.
//!
//! Min nodes return an even mix of the immediate leaf value and the worst
//! sampled reply rather than the raw minimum: a single-sample minimum is so
//! noisy that taking it verbatim makes the bot fold to phantom resistance.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use holdem_core::eval::strength;
use holdem_core::state::Decision;

use crate::ev;
use crate::strategy::{
    fallback_decision, legalize, log_decision, log_fallback, search_leaf_value, DecisionError,
    DecisionOutcome, Strategy, StrategyContext,
};

const DEFAULT_DEPTH: u8 = 6;

/// Folding to a bet below two big blinds is penalized harder: cheap bets
/// should almost never take the pot down uncontested.
const CHEAP_FOLD_PENALTY: f64 = 15.0;
const STANDARD_FOLD_PENALTY: f64 = 5.0;

pub struct MinimaxStrategy {
    rng: SmallRng,
    depth: u8,
}

impl MinimaxStrategy {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth.max(1);
        self
    }

    fn decide_inner(&mut self, ctx: &StrategyContext<'_>) -> Result<Decision, DecisionError> {
        let strength = strength::hand_strength(ctx.hole, ctx.community)?;
        let on_button = ctx.on_button();
        let depth = self.depth;

        let mut best_decision = if ctx.to_call == 0 {
            Decision::Check
        } else {
            Decision::Call
        };
        let mut best_value =
            self.opponent_turn(strength, ctx.pot, ctx.to_call, depth, on_button, false);

        if ctx.to_call > 0 {
            let fold_value = self.fold_value(ctx);
            if fold_value > best_value {
                best_decision = Decision::Fold;
                best_value = fold_value;
            }
        }

        for raise in ev::raise_candidates(ctx.state) {
            let value = self.opponent_turn(strength, ctx.pot, raise, depth, on_button, true);
            if value > best_value {
                best_decision = Decision::Raise(raise);
                best_value = value;
            }
        }

        Ok(legalize(best_decision, ctx.state))
    }

    fn fold_value(&self, ctx: &StrategyContext<'_>) -> f64 {
        let penalty = if ctx.to_call < ctx.state.big_blind.saturating_mul(2) {
            CHEAP_FOLD_PENALTY
        } else {
            STANDARD_FOLD_PENALTY
        };
        ev::fold_ev(ctx.state.hero_bet) - penalty
    }

    /// Min node. One sampled strength stands in for the opponent's whole
    /// range; they take whichever of fold/continue is worse for us, and that
    /// adversarial value is averaged with the showdown leaf.
    fn opponent_turn(
        &mut self,
        strength: f64,
        pot: u32,
        commit: u32,
        depth: u8,
        on_button: bool,
        raising: bool,
    ) -> f64 {
        let leaf = search_leaf_value(strength, pot, commit, on_button, raising);
        if commit == 0 || depth == 0 {
            return leaf;
        }
        let opponent_strength: f64 = self.rng.gen();
        let when_folds = pot as f64;
        let when_calls = if strength > opponent_strength {
            self.hero_turn(strength, pot + commit * 2, depth - 1, on_button)
        } else {
            -(commit as f64)
        };
        0.5 * leaf + 0.5 * when_folds.min(when_calls)
    }

    /// Max node once the opponent continues: check the hand down or keep
    /// betting half pot.
    fn hero_turn(&mut self, strength: f64, pot: u32, depth: u8, on_button: bool) -> f64 {
        let check_down = strength * pot as f64;
        if depth == 0 {
            return check_down;
        }
        let bet = pot / 2;
        if bet == 0 {
            return check_down;
        }
        let keep_betting = self.opponent_turn(strength, pot, bet, depth - 1, on_button, true);
        check_down.max(keep_betting)
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MinimaxStrategy {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn decide(&mut self, ctx: &StrategyContext<'_>) -> DecisionOutcome {
        let decision = match self.decide_inner(ctx) {
            Ok(decision) => decision,
            Err(err) => {
                log_fallback(self.name(), &err);
                fallback_decision(ctx.state)
            }
        };
        log_decision(self.name(), ctx, decision);
        DecisionOutcome::plain(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_core::model::card::Card;
    use holdem_core::model::rank::Rank;
    use holdem_core::model::suit::Suit;
    use holdem_core::state::GameStateSnapshot;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn snapshot(pot: u32, to_call: u32, community: Vec<Card>) -> GameStateSnapshot {
        GameStateSnapshot {
            pot,
            to_call,
            big_blind: 20,
            min_raise: 40,
            community,
            opponents: Vec::new(),
            hero_seat: 0,
            button_seat: 0,
            player_count: 2,
            hero_chips: 1000,
            hero_bet: 0,
        }
    }

    fn quads_river() -> (GameStateSnapshot, [Card; 2]) {
        let state = snapshot(
            100,
            20,
            vec![
                card(Rank::Queen, Suit::Diamonds),
                card(Rank::Queen, Suit::Clubs),
                card(Rank::Nine, Suit::Spades),
                card(Rank::Five, Suit::Hearts),
                card(Rank::Two, Suit::Diamonds),
            ],
        );
        let hole = [
            card(Rank::Queen, Suit::Spades),
            card(Rank::Queen, Suit::Hearts),
        ];
        (state, hole)
    }

    #[test]
    fn near_nuts_raises() {
        let (state, hole) = quads_river();
        let ctx = StrategyContext::new(hole, &state);
        let mut strategy = MinimaxStrategy::with_seed(7);
        let outcome = strategy.decide(&ctx);
        assert!(outcome.decision.is_aggressive());
        assert!(outcome.decision.amount() <= state.hero_chips);
    }

    #[test]
    fn junk_folds_to_a_big_bet() {
        let state = snapshot(100, 500, Vec::new());
        let hole = [
            card(Rank::Seven, Suit::Spades),
            card(Rank::Two, Suit::Hearts),
        ];
        let ctx = StrategyContext::new(hole, &state);
        let mut strategy = MinimaxStrategy::with_seed(7);
        assert_eq!(strategy.decide(&ctx).decision, Decision::Fold);
    }

    #[test]
    fn same_seed_same_decision() {
        let (state, hole) = quads_river();
        let ctx = StrategyContext::new(hole, &state);
        let first = MinimaxStrategy::with_seed(99).decide(&ctx).decision;
        let second = MinimaxStrategy::with_seed(99).decide(&ctx).decision;
        assert_eq!(first, second);
    }

    #[test]
    fn never_checks_facing_a_bet() {
        let state = snapshot(60, 30, Vec::new());
        let hole = [
            card(Rank::Ace, Suit::Spades),
            card(Rank::Ace, Suit::Hearts),
        ];
        let ctx = StrategyContext::new(hole, &state);
        let mut strategy = MinimaxStrategy::with_seed(3);
        assert_ne!(strategy.decide(&ctx).decision, Decision::Check);
    }
}
