//! Monte Carlo rollout strategy: complete the board and deal opponent hands
//! from the unseen deck many times, then act on the observed win rate. The
//! workhorse default strategy.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use holdem_core::eval::{self, compare_hands};
use holdem_core::model::card::Card;
use holdem_core::model::deck::Deck;
use holdem_core::state::Decision;

use crate::ev;
use crate::strategy::{
    fallback_decision, legalize, log_decision, log_fallback, DecisionError, DecisionOutcome,
    Strategy, StrategyContext,
};

pub const DEFAULT_ITERATIONS: usize = 100_000;

/// Raising reopens the action, so the win rate backing a raise is shaded
/// slightly below the rollout estimate.
const RAISE_DISCOUNT: f64 = 0.95;

/// Fold thresholds on call EV. Larger bets tolerate a worse EV before
/// folding: the pot share already justifies seeing more showdowns.
const SMALL_BET_FOLD_THRESHOLD: f64 = -2.0;
const LARGE_BET_FOLD_THRESHOLD: f64 = -12.0;

pub struct MonteCarloStrategy {
    rng: SmallRng,
    iterations: usize,
}

impl MonteCarloStrategy {
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

    /// Fraction of rollouts the hero wins outright. Ties and chops count as
    /// losses, keeping the estimate conservative.
    pub fn estimate_win_probability(
        &mut self,
        ctx: &StrategyContext<'_>,
    ) -> Result<f64, DecisionError> {
        let known = ctx.known_cards();
        let deck = Deck::without(&known);
        let opponents = ctx.live_opponents_or_default();
        let board_missing = 5_usize.saturating_sub(ctx.community.len());
        let needed = board_missing + opponents * 2;
        if deck.len() < needed {
            // Snapshot claims more opponents than the deck can cover.
            return Ok(0.5);
        }

        let unseen: Vec<Card> = deck.cards().to_vec();
        let mut working = unseen.clone();
        let mut board = Vec::with_capacity(7);
        let mut wins = 0_usize;

        for _ in 0..self.iterations {
            working.copy_from_slice(&unseen);
            // partial_shuffle returns the shuffled `needed` cards first; the
            // remainder of the working copy is untouched and must not be dealt.
            let (sampled, _) = working.partial_shuffle(&mut self.rng, needed);

            board.clear();
            board.extend_from_slice(ctx.community);
            board.extend_from_slice(&sampled[..board_missing]);

            let mut hero_cards = board.clone();
            hero_cards.extend_from_slice(&ctx.hole);
            let hero = eval::evaluate(&hero_cards)?;

            let mut won = true;
            for index in 0..opponents {
                let offset = board_missing + index * 2;
                let mut villain_cards = board.clone();
                villain_cards.extend_from_slice(&sampled[offset..offset + 2]);
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

        Ok(wins as f64 / self.iterations as f64)
    }

    fn decide_inner(&mut self, ctx: &StrategyContext<'_>) -> Result<Decision, DecisionError> {
        let win_probability = self.estimate_win_probability(ctx)?;
        let raise_probability = win_probability * RAISE_DISCOUNT;

        let best_raise = ev::raise_candidates(ctx.state)
            .into_iter()
            .map(|amount| (amount, ev::raise_ev(raise_probability, ctx.pot, amount)))
            .max_by(|a, b| a.1.total_cmp(&b.1));

        let decision = if ctx.to_call == 0 {
            match best_raise {
                Some((amount, value)) if value > 0.0 => Decision::Raise(amount),
                _ => Decision::Check,
            }
        } else {
            let call_value = ev::call_ev(win_probability, ctx.pot, ctx.to_call);
            let threshold = if ctx.to_call <= ev::SMALL_BET_LIMIT {
                SMALL_BET_FOLD_THRESHOLD
            } else {
                LARGE_BET_FOLD_THRESHOLD
            };
            if call_value < threshold {
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
}

impl Default for MonteCarloStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MonteCarloStrategy {
    fn name(&self) -> &'static str {
        "monte-carlo"
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
