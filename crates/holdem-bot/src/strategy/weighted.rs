//! Weighted rollout strategy: a short simulation run where opponent hole
//! cards are biased toward a premium shortlist instead of dealt uniformly,
//! and where the hero's improvement over the run feeds the final score.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use holdem_core::eval::{self, compare_hands, strength};
use holdem_core::model::card::Card;
use holdem_core::model::deck::Deck;
use holdem_core::model::rank::Rank;
use holdem_core::model::street::Street;
use holdem_core::state::Decision;

use crate::ev;
use crate::strategy::{
    fallback_decision, legalize, log_decision, log_fallback, raise_near, DecisionError,
    DecisionOutcome, Strategy, StrategyContext,
};

pub const DEFAULT_ITERATIONS: usize = 1_000;

/// Hands the biased dealer tries to give opponents: big pairs and big-card
/// combos, by rank only.
const PREMIUM_HANDS: [(Rank, Rank); 8] = [
    (Rank::Ace, Rank::Ace),
    (Rank::King, Rank::King),
    (Rank::Queen, Rank::Queen),
    (Rank::Jack, Rank::Jack),
    (Rank::Ace, Rank::King),
    (Rank::Ace, Rank::Queen),
    (Rank::Ace, Rank::Jack),
    (Rank::King, Rank::Queen),
];

/// Preflop hands at or above this strength raise outright, skipping the
/// simulation-derived sizing entirely.
const PREMIUM_PREFLOP_STRENGTH: f64 = 0.80;

/// How much the hero's average improvement across rollouts may move the
/// final score.
const IMPROVEMENT_CAP: f64 = 0.2;

/// Probability an opponent is dealt from the premium shortlist, by street.
/// Late-street callers have already shown down ranges, so the bias fades.
fn premium_weight(street: Street) -> f64 {
    match street {
        Street::Preflop => 0.8,
        Street::Flop => 0.5,
        Street::Turn => 0.3,
        Street::River => 0.2,
    }
}

/// Confidence multiplier on the raw win rate: the same win rate means more
/// on later streets where fewer cards can overturn it.
fn street_multiplier(street: Street) -> f64 {
    match street {
        Street::Preflop => 0.8,
        Street::Flop => 1.0,
        Street::Turn => 1.1,
        Street::River => 1.2,
    }
}

pub struct WeightedSimulationStrategy {
    rng: SmallRng,
    iterations: usize,
}

impl WeightedSimulationStrategy {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            iterations: DEFAULT_ITERATIONS,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    fn decide_inner(&mut self, ctx: &StrategyContext<'_>) -> Result<Decision, DecisionError> {
        let street = ctx.street();
        let preflop_strength = strength::preflop_strength(ctx.hole);
        if street == Street::Preflop && preflop_strength >= PREMIUM_PREFLOP_STRENGTH {
            // Big pairs raise for value without waiting on the rollouts.
            let target = ctx.state.big_blind.saturating_mul(3).max(ctx.pot);
            if let Some(amount) = raise_near(ctx.state, target) {
                return Ok(legalize(Decision::Raise(amount), ctx.state));
            }
        }

        let (win_rate, avg_improvement) = self.simulate(ctx)?;
        let adjusted = (win_rate * street_multiplier(street)
            + avg_improvement.clamp(-IMPROVEMENT_CAP, IMPROVEMENT_CAP))
        .clamp(0.0, 1.0);

        let best_raise = ev::raise_candidates(ctx.state)
            .into_iter()
            .map(|amount| {
                let shaped = (adjusted * size_modifier(amount, ctx.pot)).min(1.0);
                (amount, ev::raise_ev(shaped, ctx.pot, amount))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1));

        let decision = if ctx.to_call == 0 {
            match best_raise {
                Some((amount, value)) if value > 0.0 => Decision::Raise(amount),
                _ => Decision::Check,
            }
        } else {
            let call_value = ev::call_ev(adjusted, ctx.pot, ctx.to_call);
            if call_value < 0.0 && ctx.to_call > ev::SMALL_BET_LIMIT {
                Decision::Fold
            } else {
                match best_raise {
                    Some((amount, value)) if value > call_value && value > 0.0 => {
                        Decision::Raise(amount)
                    }
                    _ => Decision::Call,
                }
            }
        };

        Ok(legalize(decision, ctx.state))
    }

    /// Runs the biased rollouts. Returns the win rate and the average gap
    /// between the hero's final made-hand strength and the current one.
    fn simulate(&mut self, ctx: &StrategyContext<'_>) -> Result<(f64, f64), DecisionError> {
        let known = ctx.known_cards();
        let current_strength = strength::hand_strength(ctx.hole, ctx.community)?;
        let deck = Deck::without(&known);
        let opponents = ctx.live_opponents_or_default();
        let board_missing = 5_usize.saturating_sub(ctx.community.len());
        if deck.len() < board_missing + opponents * 2 {
            return Ok((0.5, 0.0));
        }

        let weight = premium_weight(ctx.street());
        let unseen: Vec<Card> = deck.cards().to_vec();
        let mut wins = 0_usize;
        let mut improvement_sum = 0.0;

        for _ in 0..self.iterations {
            let mut working = unseen.clone();
            working.shuffle(&mut self.rng);

            let mut villains = Vec::with_capacity(opponents);
            for _ in 0..opponents {
                match self.deal_opponent(&mut working, weight) {
                    Some(hand) => villains.push(hand),
                    None => break,
                }
            }

            let mut board = ctx.community.to_vec();
            for _ in 0..board_missing {
                match working.pop() {
                    Some(card) => board.push(card),
                    None => break,
                }
            }

            let mut hero_cards = board.clone();
            hero_cards.extend_from_slice(&ctx.hole);
            let hero = eval::evaluate(&hero_cards)?;
            improvement_sum +=
                strength::win_probability(&hero, 5) - current_strength;

            let mut won = true;
            for villain_hand in &villains {
                let mut villain_cards = board.clone();
                villain_cards.extend_from_slice(villain_hand);
                let villain = eval::evaluate(&villain_cards)?;
                if compare_hands(&hero, &villain) != std::cmp::Ordering::Greater {
                    won = false;
                    break;
                }
            }
            if won {
                wins += 1;
            }
        }

        let n = self.iterations as f64;
        Ok((wins as f64 / n, improvement_sum / n))
    }

    /// Deals one opponent hand, trying a random premium combo with the given
    /// probability and falling back to the top of the shuffled stub.
    fn deal_opponent(&mut self, working: &mut Vec<Card>, weight: f64) -> Option<[Card; 2]> {
        if working.len() < 2 {
            return None;
        }
        if self.rng.gen::<f64>() < weight {
            let (first_rank, second_rank) =
                PREMIUM_HANDS[self.rng.gen_range(0..PREMIUM_HANDS.len())];
            if let Some(i) = working.iter().position(|c| c.rank == first_rank) {
                let first = working.swap_remove(i);
                if let Some(j) = working.iter().position(|c| c.rank == second_rank) {
                    let second = working.swap_remove(j);
                    return Some([first, second]);
                }
                // Combo not available in the stub; deal uniformly instead.
                working.push(first);
            }
        }
        let first = working.pop()?;
        let second = working.pop()?;
        Some([first, second])
    }
}

/// Raise-size shaping: small and pot-sized raises get called by worse more
/// often, overbets fold out the hands we beat.
fn size_modifier(amount: u32, pot: u32) -> f64 {
    if amount <= pot / 2 {
        1.05
    } else if amount <= pot {
        1.10
    } else {
        0.95
    }
}

impl Default for WeightedSimulationStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for WeightedSimulationStrategy {
    fn name(&self) -> &'static str {
        "weighted-simulation"
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
    use holdem_core::model::suit::Suit;
    use holdem_core::state::{GameStateSnapshot, OpponentState, PlayerId};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn opponent(id: u64) -> OpponentState {
        OpponentState {
            id: PlayerId(id),
            folded: false,
            active: true,
            chips: 1000,
            last_action: None,
        }
    }

    fn snapshot(pot: u32, to_call: u32, community: Vec<Card>, opponents: usize) -> GameStateSnapshot {
        GameStateSnapshot {
            pot,
            to_call,
            big_blind: 20,
            min_raise: 40,
            community,
            opponents: (1..=opponents as u64).map(opponent).collect(),
            hero_seat: 0,
            button_seat: 0,
            player_count: opponents + 1,
            hero_chips: 1000,
            hero_bet: 0,
        }
    }

    #[test]
    fn pocket_aces_raise_preflop_without_simulating() {
        let state = snapshot(30, 20, Vec::new(), 2);
        let hole = [
            card(Rank::Ace, Suit::Spades),
            card(Rank::Ace, Suit::Hearts),
        ];
        let ctx = StrategyContext::new(hole, &state);
        let mut strategy = WeightedSimulationStrategy::with_seed(1).with_iterations(10);
        assert!(strategy.decide(&ctx).decision.is_aggressive());
    }

    #[test]
    fn biased_dealing_lowers_the_win_rate() {
        // Against premium-weighted ranges a medium hand wins less often than
        // against uniform deals, which Monte Carlo approximates at weight 0.
        let state = snapshot(100, 0, Vec::new(), 2);
        let hole = [
            card(Rank::Eight, Suit::Spades),
            card(Rank::Eight, Suit::Hearts),
        ];
        let ctx = StrategyContext::new(hole, &state);
        let (biased, _) = WeightedSimulationStrategy::with_seed(21)
            .with_iterations(2_000)
            .simulate(&ctx)
            .unwrap();
        let uniform = crate::strategy::MonteCarloStrategy::with_seed(21)
            .with_iterations(2_000)
            .estimate_win_probability(&ctx)
            .unwrap();
        assert!(biased < uniform);
    }

    #[test]
    fn nuts_on_the_river_raise() {
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
            1,
        );
        let hole = [
            card(Rank::Queen, Suit::Spades),
            card(Rank::Queen, Suit::Hearts),
        ];
        let ctx = StrategyContext::new(hole, &state);
        let mut strategy = WeightedSimulationStrategy::with_seed(5).with_iterations(500);
        assert!(strategy.decide(&ctx).decision.is_aggressive());
    }

    #[test]
    fn junk_folds_to_a_large_bet() {
        let state = snapshot(100, 300, Vec::new(), 3);
        let hole = [
            card(Rank::Seven, Suit::Spades),
            card(Rank::Two, Suit::Hearts),
        ];
        let ctx = StrategyContext::new(hole, &state);
        let mut strategy = WeightedSimulationStrategy::with_seed(5).with_iterations(500);
        assert_eq!(strategy.decide(&ctx).decision, Decision::Fold);
    }

    #[test]
    fn same_seed_same_decision() {
        let state = snapshot(
            120,
            40,
            vec![
                card(Rank::King, Suit::Diamonds),
                card(Rank::Eight, Suit::Clubs),
                card(Rank::Three, Suit::Spades),
            ],
            2,
        );
        let hole = [
            card(Rank::King, Suit::Spades),
            card(Rank::Ten, Suit::Hearts),
        ];
        let ctx = StrategyContext::new(hole, &state);
        let first = WeightedSimulationStrategy::with_seed(13)
            .with_iterations(400)
            .decide(&ctx)
            .decision;
        let second = WeightedSimulationStrategy::with_seed(13)
            .with_iterations(400)
            .decide(&ctx)
            .decision;
        assert_eq!(first, second);
    }
}
